use chrono::{DateTime, Utc};

use crate::core::TimelineItem;

type IdAccessor<T> = Box<dyn Fn(&T) -> String>;
type TimeAccessor<T> = Box<dyn Fn(&T) -> Option<DateTime<Utc>>>;
type TitleAccessor<T> = Box<dyn Fn(&T) -> String>;

/// Projection from host domain records onto timeline items.
///
/// Records are never copied into the view's public surface: callbacks such as
/// item clicks always receive the original `&T`.
pub struct TimelineAccessors<T> {
    id: IdAccessor<T>,
    start: TimeAccessor<T>,
    end: Option<TimeAccessor<T>>,
    title: Option<TitleAccessor<T>>,
}

impl<T> TimelineAccessors<T> {
    /// `start` returning `None` marks a record as malformed; it is left out of layout.
    #[must_use]
    pub fn new(
        id: impl Fn(&T) -> String + 'static,
        start: impl Fn(&T) -> Option<DateTime<Utc>> + 'static,
    ) -> Self {
        Self {
            id: Box::new(id),
            start: Box::new(start),
            end: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: impl Fn(&T) -> Option<DateTime<Utc>> + 'static) -> Self {
        self.end = Some(Box::new(end));
        self
    }

    /// Without a title accessor the item id is shown.
    #[must_use]
    pub fn with_title(mut self, title: impl Fn(&T) -> String + 'static) -> Self {
        self.title = Some(Box::new(title));
        self
    }

    #[must_use]
    pub fn to_item(&self, record: &T) -> Option<TimelineItem> {
        let start = (self.start)(record)?;
        let mut item = TimelineItem::new((self.id)(record), start);
        if let Some(end) = &self.end {
            item = item.with_optional_end(end(record));
        }
        if let Some(title) = &self.title {
            item = item.with_title(title(record));
        }
        Some(item)
    }
}

impl<T> std::fmt::Debug for TimelineAccessors<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineAccessors")
            .field("has_end", &self.end.is_some())
            .field("has_title", &self.title.is_some())
            .finish_non_exhaustive()
    }
}

use std::time::Duration;

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Testimonial slider: a circular index over a fixed number of items,
/// mirrored into one active item and one active indicator dot.
///
/// Autoplay is modelled as armed/paused state rather than a live
/// timer: when armed, [`autoplay_tick`](Carousel::autoplay_tick)
/// advances and reports the interval to wait before the next call.
/// Arming always replaces, so there is never more than one pending
/// autoplay tick.
pub struct Carousel {
    len: usize,
    index: usize,
    autoplay: bool,
}

impl Carousel {
    /// `None` for an empty item list; the whole region stays hidden.
    pub fn new(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }

        Some(Self {
            len,
            index: 0,
            autoplay: true,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        self.index
    }

    /// Jumps to a dot. Out-of-range targets are rejected as a no-op
    /// rather than clamped, so a bad caller cannot silently land on an
    /// unintended slide.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }

    /// Pointer entered the carousel surface: stop autoplay.
    pub fn pause(&mut self) {
        self.autoplay = false;
    }

    /// Pointer left: re-arm autoplay.
    pub fn resume(&mut self) {
        self.autoplay = true;
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    /// One autoplay step. Returns the interval until the next step, or
    /// `None` while paused.
    pub fn autoplay_tick(&mut self) -> Option<Duration> {
        if !self.autoplay {
            return None;
        }
        self.next();
        Some(AUTOPLAY_INTERVAL)
    }

    /// Active flag per item (and per indicator dot): exactly one `true`
    /// at the current index.
    pub fn active_flags(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.index).collect()
    }
}

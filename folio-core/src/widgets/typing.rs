use std::time::Duration;

use crate::model::AnimationSettings;

/// Pause between finishing a delete and typing the next role.
const ROLE_SWITCH_PAUSE: Duration = Duration::from_millis(500);

/// Character-by-character typing loop over the hero role strings.
///
/// The widget owns no timer. Every [`tick`](TypingAnimation::tick)
/// performs one transition and returns the delay the caller should
/// wait before the next tick, so tests can drive the whole cycle with
/// synthetic time. Exactly one tick is ever pending: each tick
/// schedules only its successor.
pub struct TypingAnimation {
    roles: Vec<String>,
    role_index: usize,
    buffer: String,
    deleting: bool,
    speed: Duration,
    hold: Duration,
}

impl TypingAnimation {
    /// Returns `None` for an empty role list; the animation never
    /// starts in that case.
    pub fn new(roles: Vec<String>, settings: &AnimationSettings) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            role_index: 0,
            buffer: String::new(),
            deleting: false,
            speed: Duration::from_millis(settings.typing_speed),
            hold: Duration::from_millis(settings.typing_delay),
        })
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    fn role(&self) -> &str {
        &self.roles[self.role_index]
    }

    /// Advances one character and returns the delay until the next
    /// tick.
    pub fn tick(&mut self) -> Duration {
        if self.deleting {
            self.buffer.pop();
        } else if let Some(c) = self.role()[self.buffer.len()..].chars().next() {
            self.buffer.push(c);
        }

        let mut delay = if self.deleting {
            self.speed / 2
        } else {
            self.speed
        };

        if !self.deleting && self.buffer == self.role() {
            // Fully typed: hold, then start deleting.
            delay = self.hold;
            self.deleting = true;
        } else if self.deleting && self.buffer.is_empty() {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
            delay = ROLE_SWITCH_PAUSE;
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AnimationSettings {
        AnimationSettings {
            typing_speed: 100,
            typing_delay: 2000,
            particle_count: 0,
        }
    }

    fn anim(roles: &[&str]) -> TypingAnimation {
        TypingAnimation::new(roles.iter().map(|s| s.to_string()).collect(), &settings())
            .unwrap()
    }

    #[test]
    fn empty_role_list_never_starts() {
        assert!(TypingAnimation::new(Vec::new(), &settings()).is_none());
    }

    #[test]
    fn buffer_is_always_a_prefix_of_the_current_role() {
        let mut a = anim(&["Engineer", "Writer"]);
        for _ in 0..200 {
            let role = a.roles[a.role_index].clone();
            a.tick();
            let current = a.roles[a.role_index].clone();
            // Right after a role switch the buffer is empty, which is
            // a prefix of anything.
            let against = if current == role { role } else { current };
            assert!(against.starts_with(a.text()), "{:?} not a prefix", a.text());
        }
    }

    #[test]
    fn full_cycle_advances_the_role_index_by_one() {
        let mut a = anim(&["abc", "de", "fgh"]);
        assert_eq!(a.role_index(), 0);

        // Type all of "abc": last forward tick holds, then flips to
        // deleting.
        for _ in 0..3 {
            a.tick();
        }
        assert_eq!(a.text(), "abc");
        assert!(a.is_deleting());

        // Delete it back down; the emptying tick switches roles.
        for _ in 0..3 {
            a.tick();
        }
        assert_eq!(a.text(), "");
        assert!(!a.is_deleting());
        assert_eq!(a.role_index(), 1);
    }

    #[test]
    fn role_index_wraps_around() {
        let mut a = anim(&["ab", "cd"]);
        for _ in 0..2 {
            // One full type+delete cycle per role.
            for _ in 0..4 {
                a.tick();
            }
        }
        assert_eq!(a.role_index(), 0);
    }

    #[test]
    fn delays_follow_the_phase() {
        let mut a = anim(&["hi"]);

        assert_eq!(a.tick(), Duration::from_millis(100)); // "h"
        assert_eq!(a.tick(), Duration::from_millis(2000)); // "hi", hold
        assert_eq!(a.tick(), Duration::from_millis(50)); // "h", deleting at half speed
        assert_eq!(a.tick(), Duration::from_millis(500)); // "", role switch pause
    }

    #[test]
    fn multibyte_roles_type_cleanly() {
        let mut a = anim(&["héllo"]);
        for _ in 0..5 {
            a.tick();
        }
        assert_eq!(a.text(), "héllo");
        assert!(a.is_deleting());
    }
}

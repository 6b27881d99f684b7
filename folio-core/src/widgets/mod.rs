//! The interactive behaviors of the generated page, modelled as small
//! state machines. None of them owns a timer or touches a document:
//! every time-driven widget advances through a `tick` that returns the
//! delay until its successor, so a runtime drives them with real
//! timers and tests drive them with synthetic time.

pub mod carousel;
pub mod gallery;
pub mod reveal;
pub mod typing;

pub use carousel::Carousel;
pub use gallery::Gallery;
pub use reveal::{CounterAnimation, OneShot, RevealSet};
pub use typing::TypingAnimation;

pub mod clock;
pub mod lifecycle;
pub mod render;
pub mod session;
pub mod surface;

// Re-export commonly used items
pub use clock::{AnimationClock, ClockState, Subscription};
pub use lifecycle::Lifecycle;
pub use render::ModeRenderer;
pub use session::SessionTimer;
pub use surface::{Color, Surface};

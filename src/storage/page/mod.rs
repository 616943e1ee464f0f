mod frame;

pub use frame::{Frame, FrameHandle};

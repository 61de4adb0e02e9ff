//! Screen components for the two application views

pub mod celebration;
pub mod choice;

pub use celebration::CelebrationScreen;
pub use choice::ChoiceScreen;

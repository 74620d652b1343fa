//! Message and height conventions - how commits signal increments and how
//! height counters are laid out inside version identifiers

pub mod height;
pub mod indicator;
pub mod message;

pub use height::{HeightConvention, HeightPosition, HeightRule, PlaceholderToken};
pub use indicator::{CompiledPattern, MessageIndicator};
pub use message::MessageConvention;

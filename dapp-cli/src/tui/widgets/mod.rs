pub mod form;
pub mod popup;
pub mod spinner;

pub use form::Form;
pub use popup::{Popup, PopupType};
pub use spinner::Spinner;

mod certification_form;

pub use certification_form::*;

mod instruction;
mod params;
mod professions;

pub use instruction::{TransformationRequest, build_instruction, build_request};
pub use params::{
    DEFAULT_AGE, MAX_AGE, MIN_AGE, NO_PROFESSION, TransformationParameters, validate_age,
};
pub use professions::{PROFESSIONS, suggest};

pub mod template;

pub use template::{CommandTemplate, PromptTemplate};

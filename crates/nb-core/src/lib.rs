pub mod class_index;
pub mod classes;
pub mod codegen;
pub mod error;
pub mod id;
pub mod jsx;
pub mod locator;
pub mod model;
pub mod mutator;
pub mod rules;
pub mod strategy;

pub use class_index::{ClassIndex, ClassValidation, StringValidation, Suggestion, TailwindClassEntry};
pub use classes::{ClassParser, ParsedClasses, StyleCategory, generate_css};
pub use codegen::{
    JsxStyle, MARKER_ATTRIBUTE, extract_components, generate_jsx, generate_jsx_from_nodes,
    insert_component, remove_component, update_component_props,
};
pub use error::CodegenError;
pub use id::ComponentId;
pub use locator::{LocatedLine, locate, locate_exact};
pub use model::*;
pub use mutator::{ElementUpdates, update_file};
pub use rules::{Breakpoint, ClassRule, ClassRuleTable, ParsedStyle};
pub use strategy::{AstStrategy, ElementMutationStrategy, ElementTarget, LineStrategy};

pub mod tool;
pub mod call_fc_auto;
pub mod schema;

pub use tool::{ToolDescription, ToolBox, ContainsTool, completion_tool};
pub use call_fc_auto::FunctionCallingAutoBuilder;
pub use schema::function_schema;

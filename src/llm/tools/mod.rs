pub mod booking_source_tool;
pub mod current_date_tool;
pub mod expression;
pub mod math_tool;
pub mod registry;
pub mod search_tool;
pub mod send_email_tool;
mod tool;

pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use search_tool::{search, SearchForTool};
pub use tool::{
    FunctionDescriptor, JsonType, LlmTool, ParametersSchema, Properties, PropertySchema,
    ToolDescriptor,
};

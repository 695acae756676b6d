use crate::error::Result;
use crate::llm::tools::tool::string_arg;
use crate::llm::tools::{JsonType, LlmTool, ToolDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

/// Tool for querying bookings from the lodgify booking source
///
/// The source is simulated and answers every date range with the same single booking.
#[derive(Debug, Clone, Default)]
pub struct BookingSourceTool;

impl BookingSourceTool {
    pub fn new() -> Self {
        Self
    }
}

impl LlmTool for BookingSourceTool {
    fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let start_date = string_arg(args, "start_date")?;
        let end_date = string_arg(args, "end_date")?;
        debug!(start_date = start_date, end_date = end_date, "Querying booking source");

        Ok(json!({
            "items": [
                {
                    "guest name": "nic",
                    "check in date": "2024-08-01",
                    "checkout date": "2024-10-01"
                }
            ]
        }))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "query_booking_source",
            "query_booking_source is used for getting bookings from lodgify between specified \
             start_date and end_date. The returned json will contain a json array of 'items', \
             which contains the list of bookings.",
        )
        .with_parameter("start_date", JsonType::String)
        .with_parameter("end_date", JsonType::String)
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}

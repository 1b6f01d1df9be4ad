//! Recording fakes shared by the use case tests.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::{ToolExecutionError, ToolExecutorPort};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use switchboard_domain::{ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec};

/// Gateway that replays queued replies and records every request.
///
/// When the queue is empty it answers with `default_reply`.
pub struct FakeGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    default_reply: String,
    models: Mutex<Option<Result<Vec<String>, GatewayError>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_reply: "ok".to_string(),
            models: Mutex::new(None),
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    pub fn with_error(self, error: GatewayError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Models reported by `available_models`
    pub fn with_models<I, S>(self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.models.lock().unwrap() = Some(Ok(models.into_iter().map(Into::into).collect()));
        self
    }

    /// Make the next `available_models` call fail
    pub fn with_models_error(self, error: GatewayError) -> Self {
        *self.models.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests sent with the given model
    pub fn requests_for(&self, model: &str) -> Vec<ChatRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.model == model)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for FakeGateway {
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_reply.clone()))
    }

    async fn available_models(&self) -> Result<Vec<String>, GatewayError> {
        let models = self.models.lock().unwrap().take();
        match models {
            Some(Ok(models)) => {
                *self.models.lock().unwrap() = Some(Ok(models.clone()));
                Ok(models)
            }
            Some(Err(e)) => Err(e),
            None => Ok(vec!["fake".to_string()]),
        }
    }
}

/// Scripted outcome for one tool
pub enum Scripted {
    Result(ToolResult),
    Error(String),
    Panic(String),
}

/// Tool executor that records every call it receives.
///
/// Unscripted tools succeed and echo their arguments back as payload.
pub struct FakeTools {
    spec: ToolSpec,
    scripted: HashMap<String, Scripted>,
    calls: Mutex<Vec<ToolCall>>,
}

impl FakeTools {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = names.into_iter().fold(ToolSpec::new(), |spec, name| {
            spec.register(ToolDefinition::new(name, "fake tool"))
        });
        Self {
            spec,
            scripted: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(mut self, tool: impl Into<String>, outcome: Scripted) -> Self {
        self.scripted.insert(tool.into(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.tool_name).collect()
    }
}

#[async_trait]
impl ToolExecutorPort for FakeTools {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolExecutionError> {
        self.calls.lock().unwrap().push(call.clone());
        match self.scripted.get(&call.tool_name) {
            Some(Scripted::Result(result)) => Ok(result.clone()),
            Some(Scripted::Error(message)) => Err(ToolExecutionError::Failed(message.clone())),
            Some(Scripted::Panic(message)) => panic!("{}", message),
            None => {
                let mut result = ToolResult::success(&call.tool_name);
                for (key, value) in &call.arguments {
                    result = result.with_field(key.clone(), value.clone());
                }
                Ok(result)
            }
        }
    }
}

pub fn failed(tool: &str, message: &str) -> ToolResult {
    ToolResult::failure(tool, ToolError::execution_failed(message))
}

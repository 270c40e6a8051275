//! Test doubles for the executor and the model

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use codepolish_analysis::FilePipeline;
use codepolish_core::{CodeExecutor, ExecutionOutcome};
use codepolish_llm::{LlmError, LlmResult, RewriteClient, TextGenerator};

/// Executor replaying queued outcomes; passes once the queue is empty
#[derive(Default)]
pub struct FakeExecutor {
    outcomes: Mutex<VecDeque<ExecutionOutcome>>,
    calls: Mutex<Vec<(Option<String>, String)>>,
}

impl FakeExecutor {
    pub fn with_outcomes(outcomes: Vec<ExecutionOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Option<String>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeExecutor for FakeExecutor {
    async fn execute(&self, language: Option<&str>, code: &str) -> ExecutionOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((language.map(str::to_string), code.to_string()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ExecutionOutcome::passed(""))
    }
}

/// Generator returning one canned answer and recording prompts
pub struct FakeGenerator {
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| LlmError::Inference("model unavailable".to_string()))
    }
}

pub fn pipeline(executor: FakeExecutor, generator: FakeGenerator) -> FilePipeline<FakeExecutor, FakeGenerator> {
    FilePipeline::new(executor, RewriteClient::new(generator))
}

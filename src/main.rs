//! ragdesk console: one message per stdin line, one reply per stdout line.
//!
//! Usage: `ragdesk [SESSION_ID]`. Without a session id a random one is used.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use ragdesk::adapters::{
    order_lookup_definition, CounterRateLimiter, InMemoryKeyValueStore, InMemoryOrderStore,
    InMemoryPassageIndex, JsonSchemaValidator, MockAIProvider, OpenAIConfig, OpenAIProvider,
    RedisKeyValueStore, SessionIdentityResolver, ToolLimits, ToolRateLimitConfig,
};
use ragdesk::application::{
    AnswerCache, AnswerEngineConfig, DecisionRouter, GroundedAnswerEngine, HandleMessageCommand,
    MessageOrchestrator, ToolDispatcher,
};
use ragdesk::config::{AiConfig, AiProvider, AppConfig, LogFormat, RedisConfig, TelemetryConfig};
use ragdesk::domain::foundation::SessionId;
use ragdesk::domain::knowledge::CacheKeyBuilder;
use ragdesk::domain::tools::ToolRegistry;
use ragdesk::ports::{AIProvider, KeyValueStore, StoreError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.telemetry);
    config.validate()?;

    let session = match std::env::args().nth(1) {
        Some(raw) => SessionId::new(raw)?,
        None => SessionId::generate(),
    };

    let orchestrator = build_orchestrator(&config).await?;
    info!(session_id = %session, "ragdesk ready, reading messages from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        let reply = orchestrator
            .handle(HandleMessageCommand::new(session.clone(), message))
            .await;
        println!("{}", reply);
    }

    Ok(())
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| telemetry.log_filter.clone().into());

    // Logs go to stderr so stdout carries replies only.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match telemetry.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn build_orchestrator(config: &AppConfig) -> Result<MessageOrchestrator, Box<dyn Error>> {
    let store = build_store(&config.redis).await?;
    let ai = build_ai(&config.ai)?;

    let index = match &config.rag.passages_path {
        Some(path) => {
            InMemoryPassageIndex::load_json_file(path, &config.rag.splitter()?).await?
        }
        None => InMemoryPassageIndex::new(),
    };
    info!(passages = index.len().await, "Passage index loaded");

    let mut registry = ToolRegistry::new();
    registry.register(order_lookup_definition(Arc::new(
        InMemoryOrderStore::with_demo_orders(),
    )))?;
    let registry = Arc::new(registry);

    let limits = ToolLimits::new(config.rate_limit.max_calls, config.rate_limit.window());
    let dispatcher = ToolDispatcher::new(
        registry.clone(),
        Arc::new(JsonSchemaValidator::new()),
        Arc::new(CounterRateLimiter::new(
            store.clone(),
            ToolRateLimitConfig::new(limits),
        )),
        Arc::new(SessionIdentityResolver::new()),
    );

    let engine = GroundedAnswerEngine::new(
        Arc::new(index),
        ai.clone(),
        AnswerCache::new(store),
        CacheKeyBuilder::new(config.rag.cache_namespace.clone()),
        AnswerEngineConfig::default()
            .with_top_k(config.rag.top_k)
            .with_answer_ttl(config.rag.cache_ttl()),
    );

    Ok(MessageOrchestrator::new(
        DecisionRouter::new(ai, registry),
        dispatcher,
        Arc::new(engine),
    ))
}

async fn build_store(redis: &RedisConfig) -> Result<Arc<dyn KeyValueStore>, Box<dyn Error>> {
    let Some(url) = redis.url() else {
        info!("No Redis URL configured, using in-memory store");
        return Ok(Arc::new(InMemoryKeyValueStore::new()));
    };

    let store = tokio::time::timeout(redis.timeout(), RedisKeyValueStore::connect(url))
        .await
        .map_err(|_| StoreError::Unavailable(format!("connect timed out after {:?}", redis.timeout())))??;
    info!("Connected to Redis");
    Ok(Arc::new(store))
}

fn build_ai(ai: &AiConfig) -> Result<Arc<dyn AIProvider>, Box<dyn Error>> {
    match ai.provider {
        AiProvider::Mock => {
            info!("Using mock AI provider");
            Ok(Arc::new(MockAIProvider::new()))
        }
        AiProvider::OpenAI => {
            let key = ai.api_key.clone().unwrap_or_default();
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(key)
                    .with_model(ai.model.clone())
                    .with_base_url(ai.base_url.clone())
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )?;
            info!(model = %ai.model, "Using OpenAI-compatible provider");
            Ok(Arc::new(provider))
        }
    }
}

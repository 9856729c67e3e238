//! Telegram transport
//!
//! Binds the router to Telegram: `/start` renders the caller's main menu
//! as a fresh message; every button press re-renders the same message in
//! place and is always acknowledged. Uses the explicit Dispatcher pattern
//! for reliable long polling.

use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::{
    dispatching::UpdateFilterExt,
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, Update},
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::managers::{EmployeeManager, RequestManager, ShiftManager};
use crate::menu::Button as MenuButton;
use crate::roles::RoleResolver;
use crate::router::Router;
use crate::session::{SessionPatch, SessionStore};
use crate::tracker::TrackerClient;

const SESSION_CAPACITY: usize = 10_000;

/// Shared state handed to every handler through the dispatcher.
pub struct BotData {
    pub router: Router,
    pub resolver: RoleResolver,
    pub sessions: SessionStore,
}

/// Run the Telegram bot until the process is stopped.
pub async fn run_bot(config: Config) -> Result<()> {
    let client = Arc::new(TrackerClient::new(&config).context("building tracker client")?);

    let employees = EmployeeManager::new(client.clone());
    let requests = RequestManager::new(client.clone());
    let shifts = ShiftManager::new(client);

    let resolver = RoleResolver::new(
        config.admin_telegram_id.clone(),
        Arc::new(employees.clone()),
    );
    let router = Router::new(employees, requests, shifts);

    let data = Arc::new(BotData {
        router,
        resolver,
        sessions: SessionStore::new(SESSION_CAPACITY),
    });

    let bot = Bot::new(config.bot_token.clone());

    info!("===========================================");
    info!("  Staffbot - starting...");
    info!("===========================================");
    info!("Tracker: {}", config.tracker_base_url);

    // Verify bot token by calling getMe
    match bot.get_me().await {
        Ok(me) => {
            info!(
                "Bot authenticated: @{} (ID: {})",
                me.username.as_deref().unwrap_or("unknown"),
                me.id
            );
        }
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            anyhow::bail!("Bot authentication failed: {}", e);
        }
    }

    // Delete any existing webhook to ensure polling works
    if let Err(e) = bot.delete_webhook().await {
        warn!("Failed to delete webhook: {} (continuing anyway)", e);
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    info!("Starting dispatcher with long polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![data])
        .default_handler(|upd| async move {
            tracing::debug!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    warn!("Dispatcher stopped");
    Ok(())
}

fn keyboard(buttons: &[MenuButton]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        buttons
            .iter()
            .map(|b| vec![InlineKeyboardButton::callback(b.label.clone(), b.action.clone())]),
    )
}

/// `/start` handler: resolve the role, send the main menu, remember the
/// message id so later button presses can edit it in place.
async fn message_handler(bot: Bot, msg: Message, data: Arc<BotData>) -> ResponseResult<()> {
    if msg.text().map(str::trim) != Some("/start") {
        return Ok(());
    }

    let identity = msg
        .from
        .as_ref()
        .map(|user| user.id.0.to_string())
        .unwrap_or_default();
    let chat_id = msg.chat.id;

    info!(">>> /start: chat={}, user={}", chat_id, identity);

    let role = data.resolver.resolve(&identity).await;
    let render = data.router.on_start(role);

    match bot
        .send_message(chat_id, render.text)
        .reply_markup(keyboard(&render.buttons))
        .await
    {
        Ok(sent) => {
            data.sessions
                .update(chat_id.0, sent.id.0, SessionPatch { role: Some(role) });
        }
        Err(e) => error!("Failed to send welcome message: {}", e),
    }

    Ok(())
}

/// Button-press handler: route the action token, edit the message in
/// place, and always answer the callback query.
async fn callback_handler(bot: Bot, query: CallbackQuery, data: Arc<BotData>) -> ResponseResult<()> {
    let identity = query.from.id.0.to_string();

    let token = match &query.data {
        Some(token) => token.clone(),
        None => {
            bot.answer_callback_query(&query.id).await?;
            return Ok(());
        }
    };

    let (chat_id, message_id) = match query.message.as_ref() {
        Some(message) => (message.chat().id, message.id()),
        None => {
            bot.answer_callback_query(&query.id).await?;
            return Ok(());
        }
    };

    info!("Callback: chat={}, user={}, data={}", chat_id, identity, token);

    // Cached role when we have one, full resolution otherwise.
    let role = match data.sessions.get(chat_id.0).role {
        Some(role) => role,
        None => data.resolver.resolve(&identity).await,
    };
    data.sessions
        .update(chat_id.0, message_id.0, SessionPatch { role: Some(role) });

    let render = data.router.route(&token, role, &identity).await;

    if let Err(e) = bot
        .edit_message_text(chat_id, message_id, render.text)
        .reply_markup(keyboard(&render.buttons))
        .await
    {
        // Telegram rejects no-op edits; nothing to do beyond logging.
        warn!("Failed to edit message {}: {}", message_id.0, e);
    }

    bot.answer_callback_query(&query.id).await?;
    Ok(())
}

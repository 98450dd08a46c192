//! Message router: the single pipeline every inbound message goes
//! through. All handling for one user is serialized behind a per-user
//! lock, so the read-modify-write balance fallback and the selection
//! slot never race with a second message from the same user.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use hisob_core::locale::{Lang, replies};
use hisob_core::selection::SelectionBoard;
use hisob_core::taxonomy::{self, Category};
use hisob_core::{UserId, classify, parse_amount};
use hisob_ledger::budget::BudgetEvaluator;
use hisob_ledger::recorder::Recorder;
use hisob_ledger::store::{Store, StoreError};
use hisob_ledger::types::{Source, Transaction, User};
use tokio::sync::Mutex;

use crate::notify::{Notifier, notify_best_effort};
use crate::reply;

/// One inbound message, already stripped of transport framing.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub user_id: UserId,
    pub name: String,
    pub text: String,
    pub source: Source,
}

pub struct Router<S: Store> {
    store: Arc<S>,
    recorder: Recorder<S>,
    budget: BudgetEvaluator<S>,
    notifier: Arc<dyn Notifier>,
    selections: Mutex<SelectionBoard>,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl<S: Store> Router<S> {
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>, tz: Tz) -> Self {
        Self {
            recorder: Recorder::new(store.clone()),
            budget: BudgetEvaluator::new(store.clone(), tz),
            store,
            notifier,
            selections: Mutex::new(SelectionBoard::new()),
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one message end to end and return the reply text.
    ///
    /// Internal failures never escape: they are logged and surface to the
    /// user as a localized transient-problem reply.
    pub async fn handle_message(&self, msg: &Inbound) -> String {
        let lock = self.user_lock(msg.user_id).await;
        let _guard = lock.lock().await;
        match self.process(msg).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(user_id = msg.user_id, %err, "message pipeline failed");
                replies(self.lang_of(msg.user_id).await).transient_error.to_string()
            }
        }
    }

    /// The user tapped a category; park it and prompt for the amount.
    pub async fn handle_category_pick(
        &self,
        user_id: UserId,
        name: &str,
        category_id: &str,
    ) -> String {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let lang = match self.ensure_user(user_id, name).await {
            Ok(user) => user.lang,
            Err(err) => {
                tracing::error!(user_id, %err, "user lookup failed on category pick");
                return replies(Lang::default()).transient_error.to_string();
            }
        };
        let Some(category) = taxonomy::by_id(category_id) else {
            tracing::warn!(user_id, category_id, "pick for unknown category");
            return replies(lang).transient_error.to_string();
        };
        self.selections.lock().await.pick(user_id, category, Utc::now());
        reply::pick_ack(lang, category)
    }

    /// Drop any pending selection.
    pub async fn handle_cancel(&self, user_id: UserId) -> String {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;
        self.selections.lock().await.cancel(user_id);
        replies(self.lang_of(user_id).await).canceled.to_string()
    }

    pub async fn has_pending(&self, user_id: UserId) -> bool {
        self.selections.lock().await.pending(user_id).is_some()
    }

    async fn process(&self, msg: &Inbound) -> Result<String> {
        let user = self.ensure_user(msg.user_id, &msg.name).await?;
        let now = Utc::now();

        let pending = self.selections.lock().await.pending(msg.user_id).copied();
        if let Some(selection) = pending {
            let Some(amount) = parse_amount(&msg.text) else {
                // Selection stays parked so the user can just resend the
                // amount.
                return Ok(replies(user.lang).cannot_parse.to_string());
            };
            let category = selection.category;
            let tx = self
                .recorder
                .record(
                    msg.user_id,
                    category.name(user.lang),
                    amount,
                    category,
                    Source::Manual,
                    now,
                )
                .await?;
            // Consume only after the record landed; a storage failure
            // above leaves the selection intact for a retry.
            self.selections.lock().await.take(msg.user_id);
            return self.saved_reply(&user, category, &tx).await;
        }

        let Some(amount) = parse_amount(&msg.text) else {
            return Ok(replies(user.lang).cannot_parse.to_string());
        };
        let category = classify(&msg.text);
        let tx = self
            .recorder
            .record(msg.user_id, &msg.text, amount, category, msg.source, now)
            .await?;
        self.saved_reply(&user, category, &tx).await
    }

    async fn saved_reply(
        &self,
        user: &User,
        category: &'static Category,
        tx: &Transaction,
    ) -> Result<String> {
        if tx.amount < 0 {
            if let Some(alert) = self.budget.check(user.id, &tx.category_id, tx.created_at).await {
                let text = reply::limit_warning(user.lang, user.id, &alert);
                notify_best_effort(self.notifier.as_ref(), user.id, &text).await;
            }
        }
        let balance = self.store.get_balance(user.id).await?;
        Ok(reply::saved(user.lang, category, tx.amount, balance))
    }

    async fn ensure_user(&self, user_id: UserId, name: &str) -> Result<User, StoreError> {
        if let Some(user) = self.store.get_user(user_id).await? {
            return Ok(user);
        }
        tracing::info!(user_id, name, "creating user on first contact");
        self.store.create_user(user_id, name).await
    }

    async fn lang_of(&self, user_id: UserId) -> Lang {
        match self.store.get_user(user_id).await {
            Ok(Some(user)) => user.lang,
            _ => Lang::default(),
        }
    }

    async fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        self.user_locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }
}

//! Comment widget state.
//!
//! Submissions are optimistic: the comment is prepended to the list whether
//! or not the backend accepts it. A failed write only changes the notice the
//! user sees ([`Notice::SavedLocally`] instead of [`Notice::Saved`]); the
//! comment then lives in this session's memory only.

use chrono::{DateTime, Local, TimeZone};
use tienda_core::{Comment, CommentId, NewComment, ProductId, UserProfile, format_comment_date};
use tracing::instrument;

use crate::api::{CommentSink, CommentSource};
use crate::config::ClientConfig;

/// Author shown when no user is logged in.
pub const DEFAULT_AUTHOR: &str = "Usuario";

/// Feedback shown after a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The draft was empty or whitespace; nothing changed.
    EmptyDraft,
    /// The backend stored the comment.
    Saved,
    /// The backend write failed; the comment is shown locally only.
    SavedLocally,
}

impl Notice {
    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyDraft => "Por favor, escribe un comentario",
            Self::Saved => "Comentario guardado",
            Self::SavedLocally => "Error al guardar. Se guardó solo localmente.",
        }
    }

    /// Whether the comment was added to the list.
    #[must_use]
    pub const fn is_posted(self) -> bool {
        matches!(self, Self::Saved | Self::SavedLocally)
    }
}

/// Key of a key press in the draft editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// A key press, with the Shift modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    #[must_use]
    pub const fn with_shift(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What the editor should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter without Shift: submit, and do not insert a newline.
    Submit,
    /// Shift+Enter: a newline was appended to the draft.
    Newline,
    /// A character was appended to the draft.
    Inserted,
    /// Nothing to do.
    Ignored,
}

/// State behind the comment widget for one product.
#[derive(Debug, Clone)]
pub struct CommentWidget {
    comments: Vec<Comment>,
    draft: String,
    user: Option<UserProfile>,
    default_author: String,
    product_id: ProductId,
}

impl CommentWidget {
    /// A widget posting to `product_id` as `user`, seeded with the
    /// placeholder comments.
    #[must_use]
    pub fn new(product_id: ProductId, user: Option<UserProfile>) -> Self {
        Self {
            comments: placeholder_comments(),
            draft: String::new(),
            user,
            default_author: DEFAULT_AUTHOR.to_string(),
            product_id,
        }
    }

    /// A widget using the configured product and default author.
    #[must_use]
    pub fn from_config(config: &ClientConfig, user: Option<UserProfile>) -> Self {
        Self::new(config.comment_product_id, user).with_default_author(&config.default_author)
    }

    /// Override the author shown for anonymous comments.
    #[must_use]
    pub fn with_default_author(mut self, author: &str) -> Self {
        author.clone_into(&mut self.default_author);
        self
    }

    /// Replace the placeholders with the product's stored comments.
    ///
    /// Keeps the current list when the backend has none (or is unreachable).
    #[instrument(skip_all, fields(product_id = %self.product_id))]
    pub async fn load<S: CommentSource>(&mut self, source: &S) {
        let fetched = source.list_comments(self.product_id).await;
        if fetched.is_empty() {
            tracing::debug!("No stored comments, keeping current list");
        } else {
            self.comments = fetched;
        }
    }

    /// Comments, newest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Current draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Product new comments are associated with.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Name new comments are signed with.
    ///
    /// A blank username falls back to the default author.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.username.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.default_author)
    }

    /// Handle a key press in the draft editor.
    ///
    /// Enter submits (the caller then awaits [`Self::submit`]); Shift+Enter
    /// inserts a newline.
    pub fn on_key(&mut self, press: KeyPress) -> KeyAction {
        match press.key {
            Key::Enter if !press.shift => KeyAction::Submit,
            Key::Enter => {
                self.draft.push('\n');
                KeyAction::Newline
            }
            Key::Char(c) => {
                self.draft.push(c);
                KeyAction::Inserted
            }
            Key::Other => KeyAction::Ignored,
        }
    }

    /// Submit the draft, stamped with the current local time.
    pub async fn submit<S: CommentSink>(&mut self, sink: &S) -> Notice {
        self.submit_at(sink, Local::now()).await
    }

    /// Submit the draft as if it were written at `now`.
    ///
    /// An empty or whitespace draft is rejected without touching the list or
    /// the network. Otherwise the comment is prepended and the draft cleared
    /// regardless of whether the backend accepts it. The shown date is the
    /// calendar day in `now`'s own time zone.
    #[instrument(skip_all, fields(product_id = %self.product_id))]
    pub async fn submit_at<S: CommentSink, Tz: TimeZone>(
        &mut self,
        sink: &S,
        now: DateTime<Tz>,
    ) -> Notice {
        if self.draft.trim().is_empty() {
            return Notice::EmptyDraft;
        }

        let text = self.draft.clone();
        let payload = NewComment {
            product_id: self.product_id,
            body: text.clone(),
        };

        let notice = match sink.create_comment(&payload).await {
            Ok(_) => Notice::Saved,
            Err(e) => {
                tracing::error!(error = %e, "Error saving comment, keeping it locally");
                Notice::SavedLocally
            }
        };

        let comment = Comment {
            id: self.next_id(now.timestamp_millis()),
            author: self.author_name().to_string(),
            body: text,
            date: format_comment_date(&now),
            product_id: Some(self.product_id),
        };
        self.comments.insert(0, comment);
        self.draft.clear();

        notice
    }

    /// Millisecond timestamp, bumped past existing IDs so rapid submissions
    /// stay unique.
    fn next_id(&self, stamp: i64) -> CommentId {
        let newest = self
            .comments
            .iter()
            .map(|comment| comment.id.get())
            .max()
            .unwrap_or(i64::MIN);
        CommentId::new(stamp.max(newest.saturating_add(1)))
    }
}

/// The two comments the widget shows before anyone has posted.
#[must_use]
pub fn placeholder_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: CommentId::new(1),
            author: "Pao".to_string(),
            body: "¡Excelente servicio! Los mangas llegaron en perfecto estado y muy rápido."
                .to_string(),
            date: "23 Nov 2025".to_string(),
            product_id: None,
        },
        Comment {
            id: CommentId::new(2),
            author: "Leo".to_string(),
            body: "Muy buena atención y envío rápido.".to_string(),
            date: "23 Nov 2024".to_string(),
            product_id: None,
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use chrono::{FixedOffset, Utc};
    use tienda_core::UserId;

    use super::*;
    use crate::api::ApiError;

    /// Records every payload and answers with a fixed outcome.
    struct FakeSink {
        fail: bool,
        received: Mutex<Vec<NewComment>>,
    }

    impl FakeSink {
        fn ok() -> Self {
            Self {
                fail: false,
                received: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                received: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.received.lock().unwrap().len()
        }
    }

    impl CommentSink for FakeSink {
        async fn create_comment(
            &self,
            comment: &NewComment,
        ) -> Result<serde_json::Value, ApiError> {
            self.received.lock().unwrap().push(comment.clone());
            if self.fail {
                Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(serde_json::json!({ "id": 77 }))
            }
        }
    }

    struct FakeSource(Vec<Comment>);

    impl CommentSource for FakeSource {
        async fn list_comments(&self, _product_id: ProductId) -> Vec<Comment> {
            self.0.clone()
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_seeded_with_placeholders() {
        let widget = CommentWidget::new(ProductId::new(1), None);
        let authors: Vec<&str> = widget.comments().iter().map(|c| c.author.as_str()).collect();
        assert_eq!(authors, ["Pao", "Leo"]);
        assert!(widget.draft().is_empty());
    }

    #[tokio::test]
    async fn test_empty_draft_rejected() {
        let sink = FakeSink::ok();
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.set_draft("   \n\t");

        let notice = widget.submit_at(&sink, at()).await;

        assert_eq!(notice, Notice::EmptyDraft);
        assert_eq!(notice.message(), "Por favor, escribe un comentario");
        assert_eq!(widget.comments().len(), 2);
        assert_eq!(widget.draft(), "   \n\t");
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_prepends() {
        let sink = FakeSink::ok();
        let user = UserProfile::new(UserId::new(3), "pao");
        let mut widget = CommentWidget::new(ProductId::new(1), Some(user));
        widget.set_draft("Me encantó");

        let notice = widget.submit_at(&sink, at()).await;

        assert_eq!(notice, Notice::Saved);
        assert_eq!(widget.comments().len(), 3);
        let first = &widget.comments()[0];
        assert_eq!(first.author, "pao");
        assert_eq!(first.body, "Me encantó");
        assert_eq!(first.date, "17 oct 2026");
        assert_eq!(first.id, CommentId::new(at().timestamp_millis()));
        assert!(widget.draft().is_empty());

        let sent = sink.received.lock().unwrap();
        assert_eq!(sent[0].product_id, ProductId::new(1));
        assert_eq!(sent[0].body, "Me encantó");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_comment_locally() {
        let sink = FakeSink::failing();
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.set_draft("Hola");

        let notice = widget.submit_at(&sink, at()).await;

        assert_eq!(notice, Notice::SavedLocally);
        assert!(notice.is_posted());
        assert_eq!(sink.calls(), 1);
        assert_eq!(widget.comments()[0].author, "Usuario");
        assert_eq!(widget.comments()[0].body, "Hola");
        assert!(widget.draft().is_empty());
    }

    #[tokio::test]
    async fn test_configured_default_author() {
        let sink = FakeSink::failing();
        let mut widget = CommentWidget::new(ProductId::new(1), None).with_default_author("Anónimo");
        widget.set_draft("Hola");
        widget.submit_at(&sink, at()).await;
        assert_eq!(widget.comments()[0].author, "Anónimo");
    }

    #[tokio::test]
    async fn test_same_millisecond_ids_stay_unique() {
        let sink = FakeSink::ok();
        let mut widget = CommentWidget::new(ProductId::new(1), None);

        widget.set_draft("uno");
        widget.submit_at(&sink, at()).await;
        widget.set_draft("dos");
        widget.submit_at(&sink, at()).await;

        let comments = widget.comments();
        assert_eq!(comments[0].body, "dos");
        assert_eq!(comments[1].body, "uno");
        assert_ne!(comments[0].id, comments[1].id);
    }

    #[tokio::test]
    async fn test_date_uses_submitter_time_zone() {
        // 22:30 on the 17th in UTC-4 is already the 18th in UTC
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        let evening = offset.with_ymd_and_hms(2026, 10, 17, 22, 30, 0).unwrap();
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.set_draft("Hola");

        widget.submit_at(&FakeSink::ok(), evening).await;

        let first = &widget.comments()[0];
        assert_eq!(first.date, "17 oct 2026");
        assert_eq!(first.id, CommentId::new(evening.timestamp_millis()));
    }

    #[tokio::test]
    async fn test_blank_username_signs_as_default_author() {
        let sink = FakeSink::ok();
        for name in ["", "   "] {
            let user = UserProfile::new(UserId::new(3), name);
            let mut widget = CommentWidget::new(ProductId::new(1), Some(user));
            assert_eq!(widget.author_name(), DEFAULT_AUTHOR);

            widget.set_draft("Hola");
            widget.submit_at(&sink, at()).await;
            assert_eq!(widget.comments()[0].author, "Usuario");
        }
    }

    #[test]
    fn test_enter_submits_shift_enter_inserts_newline() {
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.set_draft("hola");

        assert_eq!(
            widget.on_key(KeyPress::with_shift(Key::Enter)),
            KeyAction::Newline
        );
        assert_eq!(widget.draft(), "hola\n");

        assert_eq!(widget.on_key(KeyPress::new(Key::Char('!'))), KeyAction::Inserted);
        assert_eq!(widget.on_key(KeyPress::new(Key::Enter)), KeyAction::Submit);
        assert_eq!(widget.draft(), "hola\n!");
        assert_eq!(widget.on_key(KeyPress::new(Key::Other)), KeyAction::Ignored);
    }

    #[tokio::test]
    async fn test_load_replaces_placeholders_when_backend_has_comments() {
        let stored = Comment {
            id: CommentId::new(40),
            author: "Ana".to_string(),
            body: "Llegó rápido".to_string(),
            date: "1 oct 2026".to_string(),
            product_id: Some(ProductId::new(1)),
        };
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.load(&FakeSource(vec![stored.clone()])).await;
        assert_eq!(widget.comments(), [stored]);
    }

    #[tokio::test]
    async fn test_load_keeps_placeholders_when_empty() {
        let mut widget = CommentWidget::new(ProductId::new(1), None);
        widget.load(&FakeSource(Vec::new())).await;
        assert_eq!(widget.comments(), placeholder_comments().as_slice());
    }
}

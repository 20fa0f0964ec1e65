use std::sync::Arc;

use crate::application::ports::{
    ChatTransport, DispatcherClient, DispatcherClientError, MessageFormat, SessionStore,
    TransportError,
};
use crate::domain::{
    ChatId, ChatSession, ChatUserId, DocumentFormat, DocumentId, EntityKind, EntitySet,
    IncomingFile, IncomingMessage, Language, MessageContent,
};

use super::chat_command::{COMMAND_MENU, ChatCommand};
use super::chat_text::{self, texts};

pub type ChatSessionStore = dyn SessionStore<ChatUserId, ChatSession>;
pub type LanguageStore = dyn SessionStore<ChatUserId, Language>;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Translates chat messages into dispatcher calls and formats the replies.
pub struct ChatService {
    dispatcher: Arc<dyn DispatcherClient>,
    transport: Arc<dyn ChatTransport>,
    sessions: Arc<ChatSessionStore>,
    languages: Arc<LanguageStore>,
    max_file_bytes: u64,
}

/// Per-message context: where replies go and in which language.
struct Conversation {
    chat_id: ChatId,
    user_id: ChatUserId,
    language: Language,
}

impl ChatService {
    pub fn new(
        dispatcher: Arc<dyn DispatcherClient>,
        transport: Arc<dyn ChatTransport>,
        sessions: Arc<ChatSessionStore>,
        languages: Arc<LanguageStore>,
        max_file_bytes: u64,
    ) -> Self {
        Self {
            dispatcher,
            transport,
            sessions,
            languages,
            max_file_bytes,
        }
    }

    /// Handles one inbound message. Failures are reported to the chat user
    /// and logged; nothing propagates to the caller.
    #[tracing::instrument(skip(self, message), fields(chat_id = %message.chat_id, user_id = %message.user_id))]
    pub async fn handle(&self, message: IncomingMessage) {
        let chat_id = message.chat_id;
        if let Err(e) = self.dispatch(message).await {
            tracing::error!(error = %e, "Chat handler failed");
            if let Err(e) = self
                .transport
                .send_message(chat_id, chat_text::GENERIC_FAILURE, MessageFormat::Plain)
                .await
            {
                tracing::error!(error = %e, "Failed to report chat handler failure");
            }
        }
    }

    async fn dispatch(&self, message: IncomingMessage) -> Result<(), TransportError> {
        let conversation = Conversation {
            chat_id: message.chat_id,
            user_id: message.user_id,
            language: self.language_of(message.user_id).await,
        };

        match message.content {
            MessageContent::File(file) => self.on_file(&conversation, file).await,
            MessageContent::Text(text) => match ChatCommand::parse(&text) {
                Some(command) => self.on_command(&conversation, command).await,
                None => self.on_question(&conversation, &text, Reply::Answer).await,
            },
            MessageContent::Unsupported => Ok(()),
        }
    }

    async fn on_command(
        &self,
        conversation: &Conversation,
        command: ChatCommand,
    ) -> Result<(), TransportError> {
        let lang = texts(conversation.language);

        match command {
            ChatCommand::Start => self.markdown(conversation, lang.welcome).await,
            ChatCommand::Help => self.markdown(conversation, lang.help).await,
            ChatCommand::Upload => self.plain(conversation, chat_text::UPLOAD_PROMPT).await,
            ChatCommand::Entities => self.on_entities(conversation).await,
            ChatCommand::Amounts => self.on_entity_kind(conversation, EntityKind::Amounts).await,
            ChatCommand::Dates => self.on_entity_kind(conversation, EntityKind::Dates).await,
            ChatCommand::Deadlines => {
                self.on_question(conversation, chat_text::DEADLINES_QUESTION, Reply::Deadlines)
                    .await
            }
            ChatCommand::Ask(question) if question.is_empty() => {
                self.plain(conversation, chat_text::ASK_USAGE).await
            }
            ChatCommand::Ask(question) => {
                self.on_question(conversation, &question, Reply::Answer).await
            }
            ChatCommand::Lang(code) => self.on_lang(conversation, code).await,
            ChatCommand::Clear => {
                self.sessions.delete(&conversation.user_id).await;
                self.plain(conversation, lang.doc_cleared).await
            }
            ChatCommand::Setup => self.on_setup(conversation).await,
            ChatCommand::Unknown(name) => {
                tracing::debug!(command = %name, "Ignoring unknown command");
                Ok(())
            }
        }
    }

    async fn on_file(
        &self,
        conversation: &Conversation,
        file: IncomingFile,
    ) -> Result<(), TransportError> {
        if file.file_size.is_some_and(|size| size > self.max_file_bytes) {
            tracing::warn!(file_size = ?file.file_size, "Rejected oversized upload");
            return self.plain(conversation, chat_text::FILE_TOO_LARGE).await;
        }

        if DocumentFormat::from_filename(&file.file_name).is_none() {
            tracing::warn!(file_name = %file.file_name, "Rejected unsupported upload");
            return self.plain(conversation, chat_text::UNSUPPORTED_FILE).await;
        }

        self.plain(conversation, texts(conversation.language).processing)
            .await?;

        let data = match self.transport.download_file(&file.file_id).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Failed to download chat file");
                return self.plain(conversation, PROCESS_FAILED).await;
            }
        };

        if data.len() as u64 > self.max_file_bytes {
            return self.plain(conversation, chat_text::FILE_TOO_LARGE).await;
        }

        let file_size = data.len() as u64;
        let doc_id = DocumentId::for_chat_user(conversation.user_id.as_i64());

        let summary = match self.dispatcher.ingest(&doc_id, &file.file_name, data).await {
            Ok(summary) => summary,
            Err(DispatcherClientError::Api { message, .. }) => {
                let reply = format!("Error processing document: {}", message);
                return self.plain(conversation, &reply).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Document ingest failed");
                return self.plain(conversation, PROCESS_FAILED).await;
            }
        };

        self.sessions
            .put(
                conversation.user_id,
                ChatSession::new(
                    doc_id.clone(),
                    file.file_name,
                    file_size,
                    summary.entities.clone(),
                ),
            )
            .await;

        tracing::info!(doc_id = %doc_id, chunks = summary.chunks, "Document stored for chat user");

        let reply = chat_text::format_ingest_summary(conversation.language, &summary);
        self.markdown(conversation, &reply).await
    }

    async fn on_entities(&self, conversation: &Conversation) -> Result<(), TransportError> {
        let Some(mut session) = self.session_or_notify(conversation).await? else {
            return Ok(());
        };

        self.plain(conversation, chat_text::extracting_kind(EntityKind::Parties))
            .await?;

        match self.dispatcher.entities(&session.doc_id).await {
            Ok(report) => {
                let reply = chat_text::format_entities(&report.entities);
                session.entities = report.entities;
                self.sessions.put(conversation.user_id, session).await;
                self.markdown(conversation, &reply).await
            }
            Err(e) => {
                self.report_dispatch_error(conversation, e, "Failed to extract entities. Please try again.")
                    .await
            }
        }
    }

    /// `/amounts` and `/dates`: served from the session snapshot when it has
    /// any entities, otherwise fetched from the dispatcher.
    async fn on_entity_kind(
        &self,
        conversation: &Conversation,
        kind: EntityKind,
    ) -> Result<(), TransportError> {
        let Some(session) = self.session_or_notify(conversation).await? else {
            return Ok(());
        };

        self.plain(conversation, chat_text::extracting_kind(kind)).await?;

        let entities: EntitySet = if session.entities.is_empty() {
            match self.dispatcher.entities(&session.doc_id).await {
                Ok(report) => report.entities,
                Err(e) => {
                    let failure = match kind {
                        EntityKind::Amounts => "Failed to extract amounts. Please try again.",
                        _ => "Failed to extract dates. Please try again.",
                    };
                    return self.report_dispatch_error(conversation, e, failure).await;
                }
            }
        } else {
            tracing::debug!("Serving entities from session snapshot");
            session.entities
        };

        let reply = chat_text::format_entity_list(kind, entities.get(kind));
        self.markdown(conversation, &reply).await
    }

    async fn on_question(
        &self,
        conversation: &Conversation,
        question: &str,
        reply: Reply,
    ) -> Result<(), TransportError> {
        let Some(session) = self.session_or_notify(conversation).await? else {
            return Ok(());
        };

        let pending = match reply {
            Reply::Answer => texts(conversation.language).thinking,
            Reply::Deadlines => "Analyzing deadlines...",
        };
        self.plain(conversation, pending).await?;

        match self.dispatcher.ask(&session.doc_id, question).await {
            Ok(answer) => {
                let text = match reply {
                    Reply::Answer => chat_text::format_answer(&answer.answer),
                    Reply::Deadlines => chat_text::format_deadlines(&answer.answer),
                };
                self.markdown(conversation, &text).await
            }
            Err(e) => {
                let failure = match reply {
                    Reply::Answer => "Failed to process your question. Please try again.",
                    Reply::Deadlines => "Failed to analyze deadlines. Please try again.",
                };
                self.report_dispatch_error(conversation, e, failure).await
            }
        }
    }

    async fn on_lang(
        &self,
        conversation: &Conversation,
        code: Option<String>,
    ) -> Result<(), TransportError> {
        let Some(code) = code else {
            let reply = chat_text::current_language(conversation.language);
            return self.plain(conversation, &reply).await;
        };

        match code.parse::<Language>() {
            Ok(language) => {
                self.languages.put(conversation.user_id, language).await;
                self.plain(conversation, texts(language).lang_set).await
            }
            Err(_) => self.plain(conversation, &chat_text::unknown_language()).await,
        }
    }

    async fn on_setup(&self, conversation: &Conversation) -> Result<(), TransportError> {
        match self.transport.set_commands(&COMMAND_MENU).await {
            Ok(()) => {
                tracing::info!("Bot commands set up");
                self.plain(conversation, chat_text::SETUP_DONE).await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up bot commands");
                self.plain(conversation, chat_text::SETUP_FAILED).await
            }
        }
    }

    async fn session_or_notify(
        &self,
        conversation: &Conversation,
    ) -> Result<Option<ChatSession>, TransportError> {
        match self.sessions.get(&conversation.user_id).await {
            Some(session) => Ok(Some(session)),
            None => {
                self.plain(conversation, texts(conversation.language).no_doc)
                    .await?;
                Ok(None)
            }
        }
    }

    async fn report_dispatch_error(
        &self,
        conversation: &Conversation,
        error: DispatcherClientError,
        failure: &str,
    ) -> Result<(), TransportError> {
        match error {
            DispatcherClientError::Api { message, .. } => {
                self.plain(conversation, &format!("Error: {}", message)).await
            }
            other => {
                tracing::error!(error = %other, "Dispatcher call failed");
                self.plain(conversation, failure).await
            }
        }
    }

    async fn language_of(&self, user_id: ChatUserId) -> Language {
        self.languages.get(&user_id).await.unwrap_or_default()
    }

    async fn plain(&self, conversation: &Conversation, text: &str) -> Result<(), TransportError> {
        self.transport
            .send_message(conversation.chat_id, text, MessageFormat::Plain)
            .await
    }

    async fn markdown(&self, conversation: &Conversation, text: &str) -> Result<(), TransportError> {
        self.transport
            .send_message(conversation.chat_id, text, MessageFormat::Markdown)
            .await
    }
}

const PROCESS_FAILED: &str = "Failed to process your document. Please try again.";

#[derive(Debug, Clone, Copy)]
enum Reply {
    Answer,
    Deadlines,
}

//! Next Builder Language Server: Tailwind class completions, diagnostics,
//! quick fixes, and CSS hover inside `className` literals of JSX/TSX files.

mod completion;
mod diagnostics;
mod hover;
mod literals;

use nb_core::{ClassIndex, ClassParser, ClassRuleTable};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex, PoisonError};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

struct NbLanguageServer {
    client: Client,
    /// Latest full text by URI.
    documents: Mutex<HashMap<Url, String>>,
    parser: ClassParser,
    index: ClassIndex,
}

impl NbLanguageServer {
    fn new(client: Client) -> Self {
        let table = Arc::new(ClassRuleTable::new());
        Self {
            client,
            documents: Mutex::new(HashMap::new()),
            index: ClassIndex::from_rules(&table),
            parser: ClassParser::new(table),
        }
    }

    fn with_text<T>(&self, uri: &Url, f: impl FnOnce(&str) -> T) -> Option<T> {
        let docs = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        docs.get(uri).map(|text| f(text))
    }

    /// Store the new text and publish diagnostics.
    async fn on_change(&self, uri: Url, text: String) {
        let diags = diagnostics::compute_diagnostics(&text, &self.index);
        log::debug!("{uri}: {} class diagnostics", diags.len());
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri.clone(), text);
        self.client.publish_diagnostics(uri, diags, None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for NbLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![
                        "\"".to_string(),
                        " ".to_string(),
                        ":".to_string(),
                    ]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "nb-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("{} classes indexed", self.index.len());
        self.client
            .log_message(MessageType::INFO, "nb-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.on_change(doc.uri, doc.text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.on_change(uri, change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let at = params.text_document_position;
        let items = self
            .with_text(&at.text_document.uri, |text| {
                completion::compute_completions(text, at.position, &self.index)
            })
            .unwrap_or_default();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let at = params.text_document_position_params;
        Ok(self
            .with_text(&at.text_document.uri, |text| {
                hover::compute_hover(text, at.position, &self.parser, &self.index)
            })
            .flatten())
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let actions = diagnostics::quick_fixes(&params.text_document.uri, &params.context.diagnostics);
        Ok((!actions.is_empty()).then_some(actions))
    }
}

fn read_stdin(mode: &str) -> String {
    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        eprintln!("nb-lsp {mode} error: failed to read stdin: {e}");
        std::process::exit(1);
    }
    text
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // ── `nb-lsp --css` mode ─────────────────────────────────────────────
    // Reads a class string from stdin and prints the generated CSS.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--css") {
        let text = read_stdin("--css");
        println!("{}", ClassParser::default().to_css(&text));
        return;
    }

    // ── `nb-lsp --validate` mode ────────────────────────────────────────
    // Reads a class string from stdin; prints one line per invalid class
    // and exits non-zero if any were found.
    if args.get(1).map(String::as_str) == Some("--validate") {
        let text = read_stdin("--validate");
        let index = ClassIndex::from_rules(&ClassRuleTable::new());
        let result = index.validate_string(&text);
        for error in &result.errors {
            eprintln!("{error}");
        }
        for (class, suggestion) in &result.suggestions {
            eprintln!("  {class} → {suggestion}");
        }
        if !result.valid {
            std::process::exit(1);
        }
        return;
    }

    // ── Standard LSP server mode ─────────────────────────────────────────
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(NbLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

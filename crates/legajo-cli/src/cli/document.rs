//! `ingest` and `analyze` command handlers.

use std::path::Path;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use legajo_core::analysis::{validate_payload, DocumentAnalyzer};
use legajo_core::generation::GenerationProvider;
use legajo_core::ingest::Ingestor;
use legajo_infra::gemini::GeminiFileTransport;
use legajo_types::config::LegajoConfig;
use legajo_types::document::DocumentKind;

/// Guess a MIME type from the file extension.
fn guess_mime(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

fn resolve_mime(path: &Path, explicit: Option<String>) -> anyhow::Result<String> {
    match explicit {
        Some(mime) => Ok(mime),
        None => guess_mime(path)
            .map(str::to_string)
            .with_context(|| format!("cannot guess MIME type of '{}'; pass --mime", path.display())),
    }
}

/// Token that fires on Ctrl-C, aborting between protocol steps.
fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });
    token
}

pub async fn ingest_document(
    config: &LegajoConfig,
    transport: &GeminiFileTransport,
    file: &Path,
    mime: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mime = resolve_mime(file, mime)?;
    let payload =
        std::fs::read(file).with_context(|| format!("failed to read '{}'", file.display()))?;
    validate_payload(&payload, &mime, &config.limits)?;

    let ingestor =
        Ingestor::new(transport, config.ingest.clone()).with_cancellation(ctrl_c_token());
    let handle = ingestor.ingest(&payload, &mime).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "handle": handle.as_str(), "mime_type": mime })
        );
    } else {
        println!("Asset active: {handle}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn analyze_document<G: GenerationProvider>(
    config: &LegajoConfig,
    transport: &GeminiFileTransport,
    generator: &G,
    file: &Path,
    mime: Option<String>,
    kind: DocumentKind,
    prompt: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mime = resolve_mime(file, mime)?;
    let payload =
        std::fs::read(file).with_context(|| format!("failed to read '{}'", file.display()))?;

    let analyzer = DocumentAnalyzer::new(transport, generator, config)
        .with_cancellation(ctrl_c_token());
    let report = analyzer
        .analyze(&payload, &mime, kind, prompt.as_deref())
        .await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "kind": report.kind.to_string(),
                "handle": report.handle.as_str(),
                "model": report.model,
                "extraction": report.text,
            })
        );
    } else {
        println!("Model: {}", report.model);
        println!("{}", report.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_known_extensions() {
        assert_eq!(guess_mime(Path::new("a.pdf")), Some("application/pdf"));
        assert_eq!(guess_mime(Path::new("scan.PNG")), Some("image/png"));
        assert_eq!(guess_mime(Path::new("foto.JPeG")), Some("image/jpeg"));
    }

    #[test]
    fn test_guess_mime_unknown_extension() {
        assert_eq!(guess_mime(Path::new("a.docx")), None);
        assert_eq!(guess_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn test_resolve_mime_prefers_explicit() {
        let mime = resolve_mime(Path::new("a.pdf"), Some("image/png".to_string())).unwrap();
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_resolve_mime_errors_without_guess() {
        assert!(resolve_mime(Path::new("a.docx"), None).is_err());
    }

    mod ingest_validation {
        use super::*;
        use std::io::Write;

        use secrecy::SecretString;

        use legajo_types::error::AnalysisError;

        // Validation runs before the first request, so the transport is
        // never contacted and the key is never used.
        fn offline_transport() -> GeminiFileTransport {
            GeminiFileTransport::new(SecretString::from("test-key-not-real"))
        }

        fn temp_document(bytes: &[u8]) -> tempfile::NamedTempFile {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(bytes).unwrap();
            file
        }

        #[tokio::test]
        async fn test_ingest_rejects_unsupported_mime() {
            let config = LegajoConfig::default();
            let transport = offline_transport();
            let file = temp_document(b"plain text body");

            let err = ingest_document(
                &config,
                &transport,
                file.path(),
                Some("text/plain".to_string()),
                false,
            )
            .await
            .unwrap_err();

            assert!(matches!(
                err.downcast_ref::<AnalysisError>(),
                Some(AnalysisError::UnsupportedMime(_))
            ));
        }

        #[tokio::test]
        async fn test_ingest_rejects_oversized_payload() {
            let mut config = LegajoConfig::default();
            config.limits.max_payload_bytes = 16;
            let transport = offline_transport();
            let file = temp_document(&[0u8; 17]);

            let err = ingest_document(
                &config,
                &transport,
                file.path(),
                Some("application/pdf".to_string()),
                false,
            )
            .await
            .unwrap_err();

            assert!(matches!(
                err.downcast_ref::<AnalysisError>(),
                Some(AnalysisError::PayloadTooLarge { size: 17, max: 16 })
            ));
        }
    }
}

use crate::traits::{Presenter, Scanner, ScannerEvent};
use async_trait::async_trait;
use qr_guard_core::{ProceedAction, ScanRecord, UserChoice};
use qr_guard_policy::{WifiCredentialAnalyzer, WifiCredentials};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Line-oriented scanner and presenter over stdin/stdout.
///
/// Every input line is a decoded payload except the `:resume`, `:history`
/// and `:quit` commands.
pub struct TerminalInterface {
    reader: Mutex<BufReader<Stdin>>,
    wifi: WifiCredentialAnalyzer,
    launch_browser: bool,
}

impl TerminalInterface {
    pub fn new(launch_browser: bool) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
            wifi: WifiCredentialAnalyzer::new(),
            launch_browser,
        }
    }

    async fn read_line(&self) -> Option<String> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();

        match reader.read_line(&mut line).await {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    async fn send_output(&self, message: &str) {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(message.as_bytes()).await;
        let _ = stdout.write_all(b"\n").await;
        let _ = stdout.flush().await;
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new(false)
    }
}

pub fn parse_input_line(line: &str) -> ScannerEvent {
    match line.trim() {
        ":resume" => ScannerEvent::Resumed,
        ":history" => ScannerEvent::HistoryRequested,
        ":quit" | ":q" => ScannerEvent::Quit,
        _ => ScannerEvent::Decoded(line.to_string()),
    }
}

pub fn wifi_notice(creds: &WifiCredentials) -> String {
    let security = if creds.encryption.is_empty() {
        "unknown"
    } else {
        creds.encryption.as_str()
    };
    format!(
        "WiFi network \"{}\" (security: {}). Connect from your system settings.",
        creds.ssid, security
    )
}

pub fn render_history(records: &[ScanRecord]) -> String {
    if records.is_empty() {
        return "No scans yet.".to_string();
    }

    let mut out = String::from("Scan history");
    for record in records {
        out.push_str("\n\n");
        out.push_str(record.payload());
        if record.is_safe() {
            out.push_str("\n  [safe]");
        } else {
            out.push_str("\n  [suspicious]");
            for warning in record.warnings() {
                out.push_str("\n  - ");
                out.push_str(&warning.replace('\n', "\n    "));
            }
        }
        out.push_str(&format!("\n  scanned: {}", record.display_timestamp()));
        out.push_str(&format!("\n  type: {}", record.content_type()));
    }
    out
}

#[async_trait]
impl Scanner for TerminalInterface {
    async fn next_event(&self) -> Option<ScannerEvent> {
        loop {
            let line = self.read_line().await?;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_input_line(&line));
        }
    }
}

#[async_trait]
impl Presenter for TerminalInterface {
    async fn confirm(&self, payload: &str, warnings: &[String]) -> UserChoice {
        self.send_output(&format!("Suspicious code detected: {}", payload))
            .await;
        for warning in warnings {
            self.send_output(&format!("  - {}", warning.replace('\n', "\n    ")))
                .await;
        }
        self.send_output("Continue anyway? (y/N): ").await;

        match self.read_line().await {
            Some(answer) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") => {
                UserChoice::ContinueAnyway
            }
            _ => UserChoice::Cancel,
        }
    }

    async fn perform(&self, action: &ProceedAction) {
        match action {
            ProceedAction::OpenLink(url) => {
                self.send_output(&format!("Opening {}", url)).await;
                if self.launch_browser {
                    if let Err(e) = open::that(url) {
                        tracing::warn!("Failed to open browser: {}", e);
                    }
                }
            }
            ProceedAction::WifiNotice(payload) => {
                let creds = self.wifi.extract(payload);
                self.send_output(&wifi_notice(&creds)).await;
            }
        }
    }

    async fn show_history(&self, records: &[ScanRecord]) {
        self.send_output(&render_history(records)).await;
    }

    async fn show_status(&self, status: &str) {
        self.send_output(&format!("ℹ️  {}", status)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_guard_core::ContentType;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input_line(":resume"), ScannerEvent::Resumed);
        assert_eq!(parse_input_line(" :history "), ScannerEvent::HistoryRequested);
        assert_eq!(parse_input_line(":quit"), ScannerEvent::Quit);
        assert_eq!(
            parse_input_line("https://example.com"),
            ScannerEvent::Decoded("https://example.com".to_string())
        );
    }

    #[test]
    fn test_wifi_notice_from_extracted_credentials() {
        let wifi = WifiCredentialAnalyzer::new();

        let creds = wifi.extract("WIFI:S:Home;T:WPA;P:longpassword;;");
        assert_eq!(
            wifi_notice(&creds),
            "WiFi network \"Home\" (security: WPA). Connect from your system settings."
        );

        let creds = wifi.extract("WIFI:S:Cafe;;");
        assert_eq!(
            wifi_notice(&creds),
            "WiFi network \"Cafe\" (security: unknown). Connect from your system settings."
        );
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(render_history(&[]), "No scans yet.");
    }

    #[test]
    fn test_render_history_entries() {
        let records = vec![
            ScanRecord::new(
                "http://example.com",
                ContentType::Link,
                vec!["Insecure connection (not HTTPS).".to_string()],
            ),
            ScanRecord::new("hello", ContentType::Text, Vec::new()),
        ];

        let out = render_history(&records);
        assert!(out.starts_with("Scan history"));
        assert!(out.contains("http://example.com\n  [suspicious]\n  - Insecure connection (not HTTPS)."));
        assert!(out.contains("hello\n  [safe]"));
        assert!(out.contains("type: Link"));
        assert!(out.contains("type: Text"));
        assert!(out.find("http://example.com") < out.find("hello"));
    }
}

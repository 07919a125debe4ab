//! Interactive session: commands in, store updates, prompt out

use crate::clipboard::Clipboard;
use crate::command::{SessionCommand, HELP};
use crate::feedback::CopyFeedback;
use std::fmt::Write as _;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use workprompt_common::Result;
use workprompt_prompt::{effective_instruction, SelectionStore};

const COPIED_LABEL: &str = "복사됨";

/// What the event loop should do after a command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct Session {
    store: SelectionStore,
    clipboard: Clipboard,
    feedback: CopyFeedback,
    echo: bool,
}

impl Session {
    /// `echo` re-renders the prompt after every change
    pub fn new(store: SelectionStore, clipboard: Clipboard, feedback: CopyFeedback, echo: bool) -> Self {
        Self {
            store,
            clipboard,
            feedback,
            echo,
        }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn copied(&self) -> bool {
        self.feedback.is_active()
    }

    /// Input prompt, shows the copy indicator while it is active
    pub fn prompt(&self) -> String {
        let role = self.store.active_role();
        if self.copied() {
            format!("{} {} [✅ {}]> ", role.emoji, role.key, COPIED_LABEL)
        } else {
            format!("{} {}> ", role.emoji, role.key)
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        match SessionCommand::parse(line) {
            Ok(Some(command)) => self.handle(command),
            Ok(None) => Reply::default(),
            Err(e) => Reply::text(format!("⚠️  {}", e)),
        }
    }

    pub fn handle(&mut self, command: SessionCommand) -> Reply {
        debug!(?command, "handle command");

        let changed = match command {
            SessionCommand::SwitchRole(key) => {
                self.store.switch_role(key);
                return Reply::text(self.role_banner());
            }
            SessionCommand::SetTask(text) => self.store.set_task(&text),
            SessionCommand::Toggle(point) => {
                if !self.store.active_role().contains_point(&point) {
                    return self.unknown_point(&point);
                }
                self.store.toggle_point(&point)
            }
            SessionCommand::Edit { point, text } => {
                if !self.store.active_role().contains_point(&point) {
                    return self.unknown_point(&point);
                }
                self.store.set_instruction_text(&point, &text)
            }
            SessionCommand::AddDetail { point, value } => {
                if !self.store.active_role().contains_point(&point) {
                    return self.unknown_point(&point);
                }
                self.store.add_detail(&point, &value)
            }
            SessionCommand::Preset { point, index } => {
                if !self.store.active_role().contains_point(&point) {
                    return self.unknown_point(&point);
                }
                index
                    .checked_sub(1)
                    .map_or(false, |i| self.store.add_preset_detail(&point, i))
            }
            SessionCommand::RemoveDetail { point, value } => self.store.remove_detail(&point, &value),
            SessionCommand::SelectAll => self.store.select_all(),
            SessionCommand::ClearAll => self.store.clear_all(),
            SessionCommand::Reset => self.store.reset_role(),
            SessionCommand::Show => return Reply::text(self.store.compose()),
            SessionCommand::Points => return Reply::text(self.points_listing()),
            SessionCommand::Copy => return Reply::text(self.copy()),
            SessionCommand::Help => return Reply::text(HELP),
            SessionCommand::Quit => {
                return Reply {
                    output: String::new(),
                    quit: true,
                }
            }
        };

        if !changed {
            return Reply::text("변경 사항 없음");
        }
        if self.echo {
            Reply::text(self.store.compose())
        } else {
            Reply::text("✔ 반영됨")
        }
    }

    fn unknown_point(&self, point: &str) -> Reply {
        let ids: Vec<&str> = self.store.active_role().point_ids().collect();
        Reply::text(format!(
            "⚠️  '{}' 역할에 '{}' 포인트가 없어요 (가능: {})",
            self.store.active_key(),
            point,
            ids.join(", ")
        ))
    }

    fn copy(&mut self) -> String {
        let prompt = self.store.compose();
        let outcome = self.clipboard.copy(&prompt);
        info!(?outcome, role = %self.store.active_key(), "copy prompt");
        if outcome.copied() {
            self.feedback.trigger();
            format!("✅ {}", COPIED_LABEL)
        } else {
            String::new()
        }
    }

    /// Role header with help text
    pub fn role_banner(&self) -> String {
        let role = self.store.active_role();
        format!("{} {} ({})\n{}", role.emoji, role.label, role.key, role.help)
    }

    /// Points of the active role with selection, details and presets
    pub fn points_listing(&self) -> String {
        let role = self.store.active_role();
        let state = self.store.active_state();
        let mut out = String::new();

        for point in &role.points {
            let mark = if state.is_selected(&point.id) { "x" } else { " " };
            let badge = if point.recommended { " (추천)" } else { "" };
            let _ = write!(out, "[{}] {} {}{}", mark, point.id, point.label, badge);
            if let Some(desc) = &point.description {
                let _ = write!(out, " - {}", desc);
            }
            out.push('\n');

            if !state.is_selected(&point.id) {
                continue;
            }

            let _ = writeln!(out, "    지시문: {}", effective_instruction(point, state));
            let details = state.details(&point.id);
            if !details.is_empty() {
                let _ = writeln!(out, "    세부 옵션: {}", details.join(", "));
            }
            if point.detail_options.is_empty() {
                let _ = writeln!(out, "    프리셋 없음 (add 로 직접 입력)");
            } else {
                let presets: Vec<String> = point
                    .detail_options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| format!("{}) {}", i + 1, opt))
                    .collect();
                let _ = writeln!(out, "    프리셋: {}", presets.join("  "));
            }
        }

        out.trim_end().to_string()
    }

    /// Event loop: input lines and copy indicator expiry, one at a time
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> Result<()>
    where
        R: tokio::io::AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(input).lines();

        out.write_all(format!("{}\n{}\n\n", self.role_banner(), "help 로 명령어 보기").as_bytes())
            .await?;
        out.write_all(self.prompt().as_bytes()).await?;
        out.flush().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let reply = self.handle_line(&line);
                    if !reply.output.is_empty() {
                        out.write_all(reply.output.as_bytes()).await?;
                        out.write_all(b"\n").await?;
                    }
                    if reply.quit {
                        break;
                    }
                }
                _ = self.feedback.expired() => {
                    debug!("copy indicator cleared");
                    out.write_all(b"\n").await?;
                }
            }
            out.write_all(self.prompt().as_bytes()).await?;
            out.flush().await?;
        }

        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardWriter;
    use std::time::Duration;
    use workprompt_common::WorkPromptError;
    use workprompt_prompt::{RoleCatalog, RoleKey, NO_POINTS_LINE};

    struct Failing;

    impl ClipboardWriter for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn write_text(&self, _text: &str) -> Result<()> {
            Err(WorkPromptError::clipboard("no clipboard"))
        }
    }

    struct Accepting;

    impl ClipboardWriter for Accepting {
        fn name(&self) -> &str {
            "accepting"
        }

        fn write_text(&self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn session_with(primary: Box<dyn ClipboardWriter>, fallback: Box<dyn ClipboardWriter>) -> Session {
        Session::new(
            SelectionStore::new(RoleCatalog::builtin(), RoleKey::Frontend),
            Clipboard::new(primary, fallback),
            CopyFeedback::new(Duration::from_millis(1200)),
            false,
        )
    }

    fn session() -> Session {
        session_with(Box::new(Accepting), Box::new(Failing))
    }

    #[test]
    fn test_commands_update_active_role() {
        let mut session = session();
        session.handle_line("task 로그인 폼");
        session.handle_line("none");
        session.handle_line("toggle perf");
        session.handle_line("preset perf 4");

        let state = session.store().active_state();
        assert_eq!(state.task(), "로그인 폼");
        assert_eq!(state.selected_point_ids(), ["perf"]);
        assert_eq!(state.details("perf"), ["lazy loading"]);
    }

    #[test]
    fn test_show_recomposes_after_change() {
        let mut session = session();
        let before = session.handle_line("show").output;
        session.handle_line("none");
        let after = session.handle_line("show").output;
        assert_ne!(before, after);
        assert!(after.contains(NO_POINTS_LINE));
    }

    #[test]
    fn test_unknown_point_reports_options() {
        let mut session = session();
        let reply = session.handle_line("toggle ratio");
        assert!(reply.output.contains("'ratio'"));
        assert!(reply.output.contains("stack"));
        assert!(!reply.quit);
    }

    #[test]
    fn test_role_switch_banner() {
        let mut session = session();
        let reply = session.handle_line("role pm");
        assert!(reply.output.contains("서류 작성 PM"));
        assert_eq!(session.store().active_key(), RoleKey::Pm);
    }

    #[test]
    fn test_no_change_message() {
        let mut session = session();
        assert_eq!(session.handle_line("add stack TypeScript").output, "변경 사항 없음");
    }

    #[test]
    fn test_echo_renders_prompt() {
        let mut session = session();
        session.echo = true;
        let reply = session.handle_line("task 대시보드");
        assert!(reply.output.contains("[사용자 요청]\n대시보드"));
    }

    #[test]
    fn test_points_listing() {
        let session = session();
        let listing = session.points_listing();
        assert!(listing.starts_with("[x] stack 기술 스택/버전 명시 (추천)"));
        assert!(listing.contains("[ ] perf 성능 최적화"));
        assert!(listing.contains("1) Next.js App Router"));
    }

    #[test]
    fn test_points_listing_shows_effective_instruction() {
        let mut session = session();
        session.handle_line("edit stack    ");
        session.handle_line("edit perf  번들 크기 우선  ");
        session.handle_line("toggle perf");
        let snippet = session.store().active_role().point("stack").unwrap().snippet.clone();

        let listing = session.points_listing();
        assert!(listing.contains(&format!("    지시문: {}\n", snippet)));
        assert!(listing.contains("    지시문: 번들 크기 우선\n"));
        assert!(!listing.contains("    지시문: \n"));
    }

    #[tokio::test]
    async fn test_copy_falls_back_and_acknowledges() {
        let mut session = session_with(Box::new(Failing), Box::new(Accepting));
        let reply = session.handle_line("copy");
        assert_eq!(reply.output, "✅ 복사됨");
        assert!(session.copied());
        assert!(session.prompt().contains("복사됨"));
    }

    #[tokio::test]
    async fn test_copy_unavailable_is_silent() {
        let mut session = session_with(Box::new(Failing), Box::new(Failing));
        let reply = session.handle_line("copy");
        assert!(reply.output.is_empty());
        assert!(!session.copied());
    }

    #[tokio::test]
    async fn test_run_event_loop() {
        let mut session = session();
        let input: &[u8] = b"task IR\nrole ppt\ntask deck\nrole frontend\nshow\nquit\nshow\n";
        let mut out = Vec::new();
        session.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[사용자 요청]\nIR"));
        assert_eq!(session.store().state(RoleKey::Ppt).task(), "deck");
        assert_eq!(text.matches("[사용자 요청]").count(), 1);
    }
}

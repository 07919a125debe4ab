//! Interactive session commands

use workprompt_prompt::RoleKey;
use workprompt_common::{Result, WorkPromptError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SwitchRole(RoleKey),
    SetTask(String),
    Toggle(String),
    Edit { point: String, text: String },
    AddDetail { point: String, value: String },
    /// 1-based index into the point's preset options
    Preset { point: String, index: usize },
    RemoveDetail { point: String, value: String },
    SelectAll,
    ClearAll,
    Reset,
    Show,
    Points,
    Copy,
    Help,
    Quit,
}

pub const HELP: &str = "\
명령어:
  role <frontend|ppt|pm>   역할 전환
  task <텍스트>            요청 내용 입력 (비우면 예시 문구 사용)
  toggle <포인트>          포인트 선택/해제
  edit <포인트> <텍스트>   지시문 편집 (비우면 기본 지시문 사용)
  add <포인트> <텍스트>    세부 옵션 직접 추가
  preset <포인트> <번호>   프리셋 옵션 추가
  remove <포인트> <텍스트> 세부 옵션 삭제
  all | none               전체 선택 / 전체 해제
  reset                    현재 역할 초기화
  points                   포인트 목록
  show                     프롬프트 보기
  copy                     프롬프트 복사
  help | quit";

/// Split off the first whitespace-delimited word
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn require<'a>(value: &'a str, what: &str, usage: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(WorkPromptError::invalid_input(format!("{} 필요: {}", what, usage)));
    }
    Ok(value)
}

impl SessionCommand {
    /// Parse one input line; blank lines give `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let (verb, rest) = split_word(line.trim_end_matches(['\r', '\n']));
        if verb.is_empty() {
            return Ok(None);
        }

        let command = match verb.to_lowercase().as_str() {
            "role" => {
                let key = require(rest.trim(), "역할", "role <frontend|ppt|pm>")?;
                SessionCommand::SwitchRole(key.parse()?)
            }
            "task" => SessionCommand::SetTask(rest.to_string()),
            "toggle" => {
                let point = require(rest.trim(), "포인트", "toggle <포인트>")?;
                SessionCommand::Toggle(point.to_string())
            }
            "edit" => {
                let (point, text) = split_word(rest);
                let point = require(point, "포인트", "edit <포인트> <텍스트>")?;
                SessionCommand::Edit {
                    point: point.to_string(),
                    text: text.to_string(),
                }
            }
            "add" => {
                let (point, value) = split_word(rest);
                let point = require(point, "포인트", "add <포인트> <텍스트>")?;
                SessionCommand::AddDetail {
                    point: point.to_string(),
                    value: value.to_string(),
                }
            }
            "preset" => {
                let (point, number) = split_word(rest);
                let point = require(point, "포인트", "preset <포인트> <번호>")?;
                let index = number
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        WorkPromptError::invalid_input(format!("잘못된 번호: '{}'", number.trim()))
                    })?;
                SessionCommand::Preset {
                    point: point.to_string(),
                    index,
                }
            }
            "remove" => {
                let (point, value) = split_word(rest);
                let point = require(point, "포인트", "remove <포인트> <텍스트>")?;
                SessionCommand::RemoveDetail {
                    point: point.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "all" => SessionCommand::SelectAll,
            "none" | "clear" => SessionCommand::ClearAll,
            "reset" => SessionCommand::Reset,
            "show" => SessionCommand::Show,
            "points" | "ls" => SessionCommand::Points,
            "copy" => SessionCommand::Copy,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => {
                return Err(WorkPromptError::invalid_input(format!(
                    "알 수 없는 명령어: '{}' (help 참고)",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

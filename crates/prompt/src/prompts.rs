//! Prompt composition

use crate::state::SelectionState;
use crate::types::{RoleDefinition, RolePoint};

/// Section header for the role's base rules
pub const BASE_RULES_HEADER: &str = "[기본 규칙]";

/// Section header for the user's task
pub const USER_REQUEST_HEADER: &str = "[사용자 요청]";

/// Section header for the selected points
pub const POINTS_HEADER: &str = "[중요 포인트(선택됨)]";

/// Section header for the role's output rules
pub const OUTPUT_RULES_HEADER: &str = "[출력 규칙]";

/// Line rendered instead of point blocks when nothing is selected
pub const NO_POINTS_LINE: &str = "- (선택된 포인트 없음)";

/// Last line of every prompt
pub const CLOSING_LINE: &str = "마지막으로, 답변 맨 아래에 “추가로 확인하면 좋은 정보”를 3개만 제안해줘.";

const INSTRUCTION_PREFIX: &str = "  - 지시문: ";
const DETAIL_PREFIX: &str = "  - 세부 옵션: ";
const DETAIL_SEPARATOR: &str = ", ";

/// Intro line naming the role
pub fn role_intro(role: &RoleDefinition) -> String {
    format!("당신은 {} ({}) 역할의 전문가입니다.", role.label, role.emoji)
}

/// Trimmed task, or the role's placeholder when blank
pub fn effective_task<'a>(role: &'a RoleDefinition, state: &'a SelectionState) -> &'a str {
    let task = state.task().trim();
    if task.is_empty() {
        role.task_placeholder.as_str()
    } else {
        task
    }
}

/// Trimmed instruction text for `point`, or its snippet when blank
pub fn effective_instruction<'a>(point: &'a RolePoint, state: &'a SelectionState) -> &'a str {
    state
        .instruction_text(&point.id)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(point.snippet.as_str())
}

/// Point blocks in catalog order, or the placeholder line
///
/// Selected ids that the role does not define are skipped.
pub fn points_section(role: &RoleDefinition, state: &SelectionState) -> Vec<String> {
    let mut lines = Vec::new();

    for point in role.points.iter().filter(|p| state.is_selected(&p.id)) {
        lines.push(format!("- {}", point.label));
        lines.push(format!("{}{}", INSTRUCTION_PREFIX, effective_instruction(point, state)));

        let details = state.details(&point.id);
        if !details.is_empty() {
            lines.push(format!("{}{}", DETAIL_PREFIX, details.join(DETAIL_SEPARATOR)));
        }
    }

    if lines.is_empty() {
        lines.push(NO_POINTS_LINE.to_string());
    }

    lines
}

fn bullets(rules: &[String]) -> impl Iterator<Item = String> + '_ {
    rules.iter().map(|r| format!("- {}", r))
}

/// Render the full prompt for `role` with `state`
///
/// Pure: the same inputs always give the same text. Lines are joined with
/// `\n` and there is no trailing newline.
pub fn compose(role: &RoleDefinition, state: &SelectionState) -> String {
    let mut lines = vec![role_intro(role), String::new(), BASE_RULES_HEADER.to_string()];
    lines.extend(bullets(&role.base_rules));

    lines.push(String::new());
    lines.push(USER_REQUEST_HEADER.to_string());
    lines.push(effective_task(role, state).to_string());

    lines.push(String::new());
    lines.push(POINTS_HEADER.to_string());
    lines.extend(points_section(role, state));

    lines.push(String::new());
    lines.push(OUTPUT_RULES_HEADER.to_string());
    lines.extend(bullets(&role.output_rules));

    lines.push(String::new());
    lines.push(CLOSING_LINE.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoleCatalog;
    use crate::state::SelectionStore;
    use crate::types::{RoleKey, RolePoint};

    fn store(key: RoleKey) -> SelectionStore {
        SelectionStore::new(RoleCatalog::builtin(), key)
    }

    /// Lines between `header` and the next blank line
    fn section(text: &str, header: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| *l != header)
            .skip(1)
            .take_while(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn tiny_role() -> RoleDefinition {
        RoleDefinition {
            key: RoleKey::Pm,
            label: "테스터".to_string(),
            emoji: "🧪".to_string(),
            help: String::new(),
            task_placeholder: "예) 테스트".to_string(),
            base_rules: vec!["규칙 A".to_string()],
            output_rules: vec!["출력 B".to_string()],
            points: vec![RolePoint {
                id: "p".to_string(),
                label: "포인트".to_string(),
                description: None,
                snippet: "기본 지시".to_string(),
                recommended: true,
                detail_options: Vec::new(),
                default_details: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_full_layout() {
        let role = tiny_role();
        let mut state = SelectionState::new(&role);
        state.set_task("  할 일  ");
        state.add_detail("p", "X");
        state.add_detail("p", "Y");

        let expected = [
            "당신은 테스터 (🧪) 역할의 전문가입니다.",
            "",
            "[기본 규칙]",
            "- 규칙 A",
            "",
            "[사용자 요청]",
            "할 일",
            "",
            "[중요 포인트(선택됨)]",
            "- 포인트",
            "  - 지시문: 기본 지시",
            "  - 세부 옵션: X, Y",
            "",
            "[출력 규칙]",
            "- 출력 B",
            "",
            CLOSING_LINE,
        ]
        .join("\n");

        assert_eq!(compose(&role, &state), expected);
    }

    #[test]
    fn test_compose_is_pure() {
        let mut store = store(RoleKey::Frontend);
        store.set_task("로그인 폼");
        assert_eq!(store.compose(), store.compose());
    }

    #[test]
    fn test_blank_task_uses_placeholder() {
        let mut store = store(RoleKey::Frontend);
        store.set_task("   ");
        let text = store.compose();
        assert_eq!(
            section(&text, USER_REQUEST_HEADER),
            vec![store.active_role().task_placeholder.clone()]
        );
    }

    #[test]
    fn test_no_points_placeholder() {
        let mut store = store(RoleKey::Ppt);
        store.clear_all();
        let text = store.compose();
        assert_eq!(section(&text, POINTS_HEADER), vec![NO_POINTS_LINE.to_string()]);
    }

    #[test]
    fn test_detail_line_order() {
        let mut store = store(RoleKey::Frontend);
        store.clear_all();
        store.toggle_point("tests");
        store.add_detail("tests", "X");
        store.add_detail("tests", "Y");

        let points = section(&store.compose(), POINTS_HEADER);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], "- 테스트 가이드");
        assert_eq!(points[2], "  - 세부 옵션: X, Y");
    }

    #[test]
    fn test_empty_details_omit_line() {
        let mut store = store(RoleKey::Frontend);
        store.clear_all();
        store.toggle_point("seo");
        let points = section(&store.compose(), POINTS_HEADER);
        assert_eq!(points.len(), 2);
        assert!(points[1].starts_with("  - 지시문: "));
    }

    #[test]
    fn test_blank_instruction_falls_back_to_snippet() {
        let mut store = store(RoleKey::Pm);
        store.set_instruction_text("goal", "   ");
        let snippet = store.active_role().point("goal").unwrap().snippet.clone();
        let points = section(&store.compose(), POINTS_HEADER);
        assert_eq!(points[1], format!("  - 지시문: {}", snippet));
    }

    #[test]
    fn test_edited_instruction_is_trimmed() {
        let mut store = store(RoleKey::Pm);
        store.set_instruction_text("goal", "\n KPI 세 개만 \n");
        let points = section(&store.compose(), POINTS_HEADER);
        assert_eq!(points[1], "  - 지시문: KPI 세 개만");
    }

    #[test]
    fn test_points_follow_catalog_order() {
        let mut store = store(RoleKey::Frontend);
        store.clear_all();
        store.toggle_point("dx");
        store.toggle_point("stack");
        let points = section(&store.compose(), POINTS_HEADER);
        let labels: Vec<&String> = points.iter().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(labels, ["- 기술 스택/버전 명시", "- 코드 스타일/가독성"]);
    }

    #[test]
    fn test_stale_selection_is_skipped() {
        let mut role = tiny_role();
        let state = SelectionState::new(&role);
        role.points.clear();
        let text = compose(&role, &state);
        assert_eq!(section(&text, POINTS_HEADER), vec![NO_POINTS_LINE.to_string()]);
    }
}

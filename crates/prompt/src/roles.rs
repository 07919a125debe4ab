//! Built-in role definitions

use crate::types::{RoleDefinition, RoleKey, RolePoint};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn point(id: &str, label: &str, description: &str, snippet: &str) -> RolePoint {
    RolePoint {
        id: id.to_string(),
        label: label.to_string(),
        description: Some(description.to_string()),
        snippet: snippet.to_string(),
        recommended: false,
        detail_options: Vec::new(),
        default_details: Vec::new(),
    }
}

impl RolePoint {
    fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    fn options(mut self, items: &[&str]) -> Self {
        self.detail_options = strings(items);
        self
    }

    fn defaults(mut self, items: &[&str]) -> Self {
        self.default_details = strings(items);
        self
    }
}

/// Built-in role for `key`
pub fn builtin_role(key: RoleKey) -> RoleDefinition {
    match key {
        RoleKey::Frontend => frontend_role(),
        RoleKey::Ppt => ppt_role(),
        RoleKey::Pm => pm_role(),
    }
}

fn frontend_role() -> RoleDefinition {
    RoleDefinition {
        key: RoleKey::Frontend,
        label: "프론트엔드 개발자".to_string(),
        emoji: "🧑‍💻".to_string(),
        help: "요구사항을 코드로 바꾸고, 구조/품질/성능까지 챙기는 프롬프트를 만들어요.".to_string(),
        task_placeholder: "예) Next.js(App Router)에서 로그인/회원가입 폼을 만들어줘. 유효성 검사, 에러 처리, 접근성까지 고려해줘.".to_string(),
        base_rules: strings(&[
            "당신은 시니어 프론트엔드 개발자입니다. (React/Next.js/TypeScript 기준)",
            "요청이 모호하면 먼저 확인 질문 3~6개를 하고, 가정이 있으면 “가정” 섹션에 명시하세요.",
            "답변은 “설계 → 구현 → 검증(테스트/체크리스트)” 흐름으로 작성하세요.",
            "코드는 바로 붙여넣어 실행할 수 있게, 파일 단위로 제시하세요.",
        ]),
        output_rules: strings(&[
            "출력은 Markdown으로 작성",
            "섹션 구조: 1) 요약 2) 확인 질문/가정 3) 구현 계획 4) 폴더/파일 구조 5) 코드 6) 테스트/검증 7) 체크리스트",
            "코드 블록에는 언어 태그(ts/tsx)를 넣기",
        ]),
        points: vec![
            point(
                "stack",
                "기술 스택/버전 명시",
                "스택을 박아두면 답변 퀄리티가 확 올라가요",
                "기술 스택/버전(Next.js App Router, TypeScript, styled-components)을 명시하고 그 기준으로 답해줘.",
            )
            .recommended()
            .options(&[
                "Next.js App Router",
                "TypeScript",
                "styled-components",
                "React 19",
                "React Hook Form",
                "Zod",
                "TanStack Query",
                "Storybook",
                "Vitest",
                "Playwright",
                "ESLint + Prettier",
            ])
            .defaults(&["Next.js App Router", "TypeScript", "styled-components"]),
            point(
                "a11y",
                "접근성(A11y)",
                "시맨틱/ARIA/키보드 포커스",
                "접근성(시맨틱 태그, aria 속성, 키보드 포커스/탭 이동)을 기본 요건으로 포함해줘.",
            )
            .recommended()
            .options(&[
                "시맨틱 태그",
                "aria-label / aria-describedby",
                "키보드 내비게이션",
                "포커스 스타일(Outline)",
                "색 대비(Contrast)",
                "스크린리더 고려",
            ])
            .defaults(&["시맨틱 태그", "aria-label / aria-describedby", "키보드 내비게이션"]),
            point(
                "perf",
                "성능 최적화",
                "리렌더/이미지/번들",
                "성능 관점(불필요한 리렌더 방지, 코드 스플리팅, 이미지 최적화)을 고려해줘.",
            )
            .options(&[
                "불필요한 리렌더 방지",
                "useMemo/useCallback 사용 기준",
                "이미지 최적화(next/image)",
                "lazy loading",
                "번들 분석(Analyzer)",
                "리스트 가상화(virtualization)",
            ]),
            point(
                "seo",
                "SEO/메타데이터",
                "메타/OG/헤딩 구조",
                "SEO(메타데이터, OG 태그, 의미 있는 헤딩 구조)를 필요 시 포함해줘.",
            )
            .options(&["metadata 설정", "Open Graph", "Twitter Card", "헤딩 구조(H1~H3)", "구조화 데이터"]),
            point(
                "error",
                "에러 처리/엣지 케이스",
                "로딩/실패/빈 상태 UX",
                "로딩/에러/빈 상태(Empty state) UX와 예외 케이스 처리를 반드시 포함해줘.",
            )
            .recommended()
            .options(&[
                "로딩 스켈레톤",
                "토스트 vs 인라인 에러",
                "재시도 UX",
                "Empty state",
                "에러 바운더리",
                "네트워크 타임아웃",
            ])
            .defaults(&["로딩 스켈레톤", "Empty state", "에러 바운더리"]),
            point(
                "tests",
                "테스트 가이드",
                "핵심 시나리오 중심",
                "핵심 시나리오 기준으로 테스트 전략(무엇을 어떤 단위로 검증할지)을 제시해줘.",
            )
            .options(&["단위 테스트", "통합 테스트", "E2E", "Mocking(MSW)", "접근성 테스트"]),
            point(
                "dx",
                "코드 스타일/가독성",
                "타입/네이밍/구조",
                "타입 안정성(TypeScript), 네이밍/폴더 구조, 재사용성을 우선해서 코드 품질을 챙겨줘.",
            )
            .options(&["폴더 구조 제안", "타입 설계", "컴포넌트 분리 기준", "린팅/포맷팅", "재사용 훅 추출"]),
        ],
    }
}

fn ppt_role() -> RoleDefinition {
    RoleDefinition {
        key: RoleKey::Ppt,
        label: "PPT 만드는 디자이너".to_string(),
        emoji: "🎞️".to_string(),
        help: "스토리라인 → 슬라이드 구조 → 디자인 시스템까지 한 번에 뽑아요.".to_string(),
        task_placeholder: "예) 투자자에게 제품 소개하는 10장짜리 IR 덱 구성해줘. B2B SaaS, 톤은 신뢰감/미니멀.".to_string(),
        base_rules: strings(&[
            "당신은 숙련된 프레젠테이션(PPT) 디자이너입니다.",
            "먼저 목적/대상/발표 시간/슬라이드 수 등 핵심 정보를 질문하고, 모르면 합리적으로 가정하세요.",
            "스토리라인(기승전결)과 슬라이드별 메시지 1줄을 먼저 잡고, 그 다음 레이아웃/디자인을 제안하세요.",
        ]),
        output_rules: strings(&[
            "출력은 Markdown으로 작성",
            "섹션 구조: 1) 목표/대상/톤 2) 스토리라인 3) 슬라이드별 설계 표 4) 디자인 시스템(폰트/컬러/그리드) 5) 제작 팁",
            "슬라이드별 표에는 “슬라이드 제목 / 핵심 메시지 / 구성 요소 / 비주얼 가이드 / 발표자 노트” 포함",
        ]),
        points: vec![
            point(
                "ratio",
                "비율/슬라이드 수/시간",
                "분량과 밀도는 여기서 결정돼요",
                "슬라이드 비율(기본 16:9)과 총 장수/발표 시간을 기준으로 밀도를 조절해줘.",
            )
            .recommended()
            .options(&["16:9", "4:3", "8장", "10장", "12장", "5분", "7분", "10분"])
            .defaults(&["16:9", "10장"]),
            point(
                "story",
                "스토리텔링 강화",
                "문제→해결→근거→요청",
                "스토리 구조(문제 → 해결 → 근거 → 제안/요청)를 명확히 잡아줘.",
            )
            .recommended()
            .options(&["문제-해결", "AIDA", "피라미드 구조", "Before-After-Bridge", "3막 구조"])
            .defaults(&["문제-해결"]),
            point(
                "typography",
                "타이포 룰(계층)",
                "제목/본문/캡션 규칙",
                "타이포 계층(제목/본문/캡션)과 줄간/자간 가이드를 제안해줘.",
            )
            .recommended()
            .options(&[
                "제목 32–40pt",
                "본문 16–20pt",
                "캡션 12–14pt",
                "줄간 1.2–1.4",
                "한 슬라이드 1메시지",
            ])
            .defaults(&["한 슬라이드 1메시지"]),
            point(
                "color",
                "컬러 시스템",
                "메인/서브/강조",
                "컬러 팔레트(메인/서브/강조/상태)와 사용 규칙을 제안해줘.",
            )
            .options(&["메인 1 + 서브 1", "강조색 1", "상태색(성공/경고/실패)", "그레이 스케일 단계"]),
            point(
                "grid",
                "그리드/정렬",
                "여백/컬럼 기준",
                "그리드(예: 12컬럼)와 여백/정렬 원칙을 제시해 일관성을 확보해줘.",
            )
            .options(&["12컬럼", "8pt 그리드", "좌/우 여백 48px", "정렬 우선순위(좌정렬)", "베이스라인 정렬"]),
            point(
                "charts",
                "차트/데이터 시각화",
                "축/단위/강조",
                "데이터가 있다면 차트 유형 추천 + 라벨/단위/강조 방식까지 가이드해줘.",
            )
            .options(&["라인/바/도넛 선택 기준", "축/단위 표기", "강조 색상 규칙", "데이터 라벨 최소화"]),
            point(
                "motion",
                "전환/애니메이션",
                "필요한 곳만",
                "애니메이션/전환은 최소로, “메시지 전달에 필요한 경우만” 쓰는 원칙으로 제안해줘.",
            )
            .options(&["0.2~0.3s 페이드", "단계적 등장(빌드)", "전환 최소", "강조 요소만 애니메이션"]),
        ],
    }
}

fn pm_role() -> RoleDefinition {
    RoleDefinition {
        key: RoleKey::Pm,
        label: "서류 작성 PM".to_string(),
        emoji: "🗂️".to_string(),
        help: "PRD/기획서/회의록을 “읽는 즉시 실행 가능한 문서”로 만드는 프롬프트예요.".to_string(),
        task_placeholder: "예) 신규 기능(구독 결제) 도입 PRD 작성해줘. 목표/범위/요구사항/리스크/일정까지 포함.".to_string(),
        base_rules: strings(&[
            "당신은 문서화에 강한 프로젝트 매니저(PM)입니다.",
            "모호한 정보는 질문으로 드러내고, 답이 없으면 가정/리스크로 분리해 명시하세요.",
            "문서는 “읽는 사람이 바로 실행할 수 있게” 구체적으로 작성하세요.",
            "결정사항/미결정사항/액션아이템을 분리해서 기록하세요.",
        ]),
        output_rules: strings(&[
            "출력은 Markdown으로 작성",
            "기본 구조: 1) 요약 2) 배경/문제 3) 목표/성공지표 4) 범위/비범위 5) 요구사항(기능/비기능) 6) 사용자 시나리오 7) 일정/마일스톤 8) R&R 9) 리스크/대응 10) 오픈 이슈/결정 필요사항",
            "표가 유용한 곳(일정/R&R/리스크)은 표로 작성",
        ]),
        points: vec![
            point(
                "goal",
                "목표/성공지표(KPI)",
                "측정 가능한 정의가 핵심",
                "목표와 성공 지표(KPI/측정 방식/목표치)를 반드시 포함해줘.",
            )
            .recommended()
            .options(&["전환율", "리텐션", "활성 사용자(DAU/WAU/MAU)", "ARPU", "NPS", "CSAT"]),
            point(
                "scope",
                "범위/비범위",
                "스코프 크립 방지",
                "범위(In)와 비범위(Out)를 명확히 구분해줘.",
            )
            .recommended()
            .options(&["MVP 정의", "Phase 1/2", "In/Out 예시 포함", "비범위에 이유 작성"]),
            point(
                "req",
                "요구사항(기능/비기능)",
                "우선순위까지",
                "요구사항을 기능/비기능으로 나누고 우선순위(Must/Should/Could)를 붙여줘.",
            )
            .recommended()
            .options(&["MoSCoW", "Acceptance Criteria", "보안/권한", "성능", "로그/모니터링", "API 요구사항"])
            .defaults(&["MoSCoW", "Acceptance Criteria"]),
            point(
                "risks",
                "리스크/대응",
                "표로 관리",
                "리스크(원인/영향/가능성/대응)를 표로 정리해줘.",
            )
            .options(&["기술 리스크", "일정 리스크", "정책/약관", "외부 의존성", "운영/CS"]),
            point(
                "timeline",
                "일정/마일스톤",
                "의존성 포함",
                "현실적인 일정/마일스톤과 의존성을 함께 제시해줘.",
            )
            .recommended()
            .options(&["주차별 계획", "마일스톤 게이트", "의존성 명시", "버퍼 포함"])
            .defaults(&["주차별 계획", "의존성 명시"]),
            point(
                "rr",
                "R&R",
                "누가 무엇을",
                "R&R(역할/책임/승인자)을 표로 정리해줘.",
            )
            .options(&["RACI", "승인자(Approver)", "협업 부서", "운영/CS 포함"]),
            point(
                "decisions",
                "의사결정/오픈 이슈",
                "결정 필요 사항 정리",
                "결정사항/미결정사항(오픈 이슈)/결정 필요 주체를 분리해줘.",
            )
            .options(&["의사결정 로그", "오너 지정", "데드라인", "의존성 연결"]),
        ],
    }
}

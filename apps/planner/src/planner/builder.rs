//! Prompt Builder — turns a [`PlanRequest`] into the prompt pair sent to the model.

use crate::llm_client::PromptPair;
use crate::planner::models::{DayNumbering, PlanRequest};
use crate::planner::prompts::{
    COACH_SYSTEM, CSV_HEADER, CYCLE_RULE_TEMPLATE, DEFAULT_EQUIPMENT, DEFAULT_GOAL,
    FREQUENCY_LINE_TEMPLATE, MINUTES_LINE_TEMPLATE, PLAN_PROMPT_TEMPLATE, PREFIXED_DAY_RULE,
    ZERO_PADDED_DAY_RULE,
};

/// Days in one weekly microcycle.
const WEEK_DAYS: u32 = 7;

/// Prompt style of one front end: day numbering, whether the coach persona
/// goes out as a system instruction, and whether the session length is stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    numbering: DayNumbering,
    system_instruction: bool,
    session_length: bool,
}

impl PromptBuilder {
    pub const fn new(numbering: DayNumbering, system_instruction: bool) -> Self {
        Self {
            numbering,
            system_instruction,
            session_length: true,
        }
    }

    /// Leaves the session length to the model.
    pub const fn without_session_length(mut self) -> Self {
        self.session_length = false;
        self
    }

    /// Web form: `01..NN`, single prompt.
    pub const fn form() -> Self {
        Self::new(DayNumbering::ZeroPadded, false)
    }

    /// Command line: `01..NN`, coach persona as system instruction.
    pub const fn cli() -> Self {
        Self::new(DayNumbering::ZeroPadded, true)
    }

    /// Fixed beginner plan: `D1..DN`, single prompt, no session length.
    pub const fn quick() -> Self {
        Self::new(DayNumbering::Prefixed, false).without_session_length()
    }

    pub fn numbering(&self) -> DayNumbering {
        self.numbering
    }

    pub fn build(&self, request: &PlanRequest) -> PromptPair {
        let days = request.total_days();

        let day_rule = match self.numbering {
            DayNumbering::ZeroPadded => ZERO_PADDED_DAY_RULE,
            DayNumbering::Prefixed => PREFIXED_DAY_RULE,
        }
        .replace("{last}", &self.numbering.label(days));

        let (frequency_line, cycle_rule) = match request.sessions_per_week() {
            Some(freq) => {
                let freq = freq.to_string();
                let cycle = if days > WEEK_DAYS {
                    CYCLE_RULE_TEMPLATE.replace("{frequency}", &freq)
                } else {
                    String::new()
                };
                (FREQUENCY_LINE_TEMPLATE.replace("{frequency}", &freq), cycle)
            }
            None => (String::new(), String::new()),
        };

        let minutes_line = if self.session_length {
            MINUTES_LINE_TEMPLATE.replace("{minutes}", &request.session_minutes().to_string())
        } else {
            String::new()
        };

        let user = PLAN_PROMPT_TEMPLATE
            .replace("{level}", request.level().label())
            .replace("{goal}", or_default(request.goal(), DEFAULT_GOAL))
            .replace("{days}", &days.to_string())
            .replace("{minutes_line}", &minutes_line)
            .replace("{frequency_line}", &frequency_line)
            .replace("{equipment}", or_default(request.equipment(), DEFAULT_EQUIPMENT))
            .replace("{header}", CSV_HEADER)
            .replace("{day_rule}", &day_rule)
            .replace("{cycle_rule}", &cycle_rule);

        PromptPair {
            system: self.system_instruction.then(|| COACH_SYSTEM.to_string()),
            user,
        }
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::models::Level;

    fn request(days: u32, freq: Option<u32>, goal: &str, equipment: &str) -> PlanRequest {
        PlanRequest::new(Level::Beginner, goal, days, 45, freq, equipment).unwrap()
    }

    #[test]
    fn test_prompt_mentions_header_and_day_count() {
        for days in [1, 7, 10, 30] {
            let prompt = PromptBuilder::cli().build(&request(days, Some(3), "步法", "球场"));
            assert!(prompt.user.contains(CSV_HEADER));
            assert!(prompt.user.contains(&format!("总天数：{days} 天")));
            assert!(prompt.user.contains(&format!("第 {days} 天")));
        }
    }

    #[test]
    fn test_empty_goal_and_equipment_use_defaults() {
        let prompt = PromptBuilder::form().build(&request(7, None, "", "  "));
        assert!(prompt.user.contains(&format!("目标：{DEFAULT_GOAL}")));
        assert!(prompt.user.contains(&format!("器材/场地：{DEFAULT_EQUIPMENT}")));
        assert!(!prompt.user.contains("目标：\n"));
        assert!(!prompt.user.contains("目标：。"));
        assert!(!prompt.user.contains("器材/场地：\n"));
    }

    #[test]
    fn test_given_goal_is_used_verbatim() {
        let prompt = PromptBuilder::form().build(&request(7, None, "正手高远球更稳定", ""));
        assert!(prompt.user.contains("目标：正手高远球更稳定"));
        assert!(!prompt.user.contains(DEFAULT_GOAL));
    }

    #[test]
    fn test_zero_padded_day_rule() {
        let prompt = PromptBuilder::form().build(&request(9, None, "", ""));
        assert!(prompt.user.contains("Day=01"));
        assert!(prompt.user.contains("Day=09"));
    }

    #[test]
    fn test_prefixed_day_rule() {
        let prompt = PromptBuilder::quick().build(&request(7, None, "", ""));
        assert!(prompt.user.contains("Day=D1"));
        assert!(prompt.user.contains("Day=D7"));
        assert!(!prompt.user.contains("Day=01"));
    }

    #[test]
    fn test_session_length_per_style() {
        let req = request(7, None, "", "");
        assert!(PromptBuilder::cli().build(&req).user.contains("每次训练时长：45 分钟"));
        assert!(PromptBuilder::form().build(&req).user.contains("每次训练时长：45 分钟"));
        assert!(!PromptBuilder::quick().build(&req).user.contains("每次训练时长"));
    }

    #[test]
    fn test_cycle_rule_only_for_long_plans_with_frequency() {
        let long = PromptBuilder::cli().build(&request(14, Some(4), "", ""));
        assert!(long.user.contains("每周训练频率：4 次/周"));
        assert!(long.user.contains("以每周 4 次训练为一个周期循环安排"));

        let short = PromptBuilder::cli().build(&request(7, Some(4), "", ""));
        assert!(short.user.contains("每周训练频率：4 次/周"));
        assert!(!short.user.contains("周期循环"));

        let no_freq = PromptBuilder::cli().build(&request(14, None, "", ""));
        assert!(!no_freq.user.contains("每周训练频率"));
        assert!(!no_freq.user.contains("周期循环"));
    }

    #[test]
    fn test_system_instruction_per_style() {
        let req = request(7, None, "", "");
        assert_eq!(PromptBuilder::cli().build(&req).system.as_deref(), Some(COACH_SYSTEM));
        assert!(PromptBuilder::form().build(&req).system.is_none());
        assert!(PromptBuilder::quick().build(&req).system.is_none());
    }

    #[test]
    fn test_prompt_states_output_rules() {
        let prompt = PromptBuilder::form().build(&request(7, None, "", ""));
        assert!(prompt.user.contains("只输出 CSV"));
        assert!(prompt.user.contains("低/中/高"));
        assert!(prompt.user.contains("不要跳号，不要重复"));
        assert!(!prompt.user.contains('{'), "unfilled placeholder in: {}", prompt.user);
    }

    #[test]
    fn test_build_is_deterministic() {
        let req = request(10, Some(3), "杀球", "球场");
        assert_eq!(PromptBuilder::cli().build(&req), PromptBuilder::cli().build(&req));
    }
}

// Prompt constants for training plan generation.
// The model is addressed in Chinese; column names stay in English.

/// The header line every plan CSV starts with.
pub const CSV_HEADER: &str = "Day,Theme,Drills,DurationMin,Intensity,Notes";

pub const HEADER_COLUMNS: [&str; 6] = ["Day", "Theme", "Drills", "DurationMin", "Intensity", "Notes"];

/// Substituted when the user leaves the goal empty.
pub const DEFAULT_GOAL: &str = "无特别目标，均衡提升";

/// Substituted when the user leaves the equipment empty.
pub const DEFAULT_EQUIPMENT: &str = "无特殊器材要求，标准羽毛球场即可";

/// Focus list of the fixed beginner plan.
pub const QUICK_FOCUS: &str = "适合完全新手，包含热身、步法、发球、正手/反手基础、简单多球、拉伸";

/// Coach persona sent as the system instruction.
pub const COACH_SYSTEM: &str = "你是一名专业羽毛球教练，擅长为不同水平的学员制定可执行、可量化的训练计划。
你的回答必须是 CSV，而且只能是 CSV，不要任何解释、寒暄或代码块。
CSV 列固定为：
Day,Theme,Drills,DurationMin,Intensity,Notes

规则：
- DurationMin 必须是整数
- Intensity 只能是 低/中/高
- Drills 用中文书写，多个练习点之间用分号分隔
- Notes 写注意事项和常见错误纠正";

/// User prompt template.
/// Replace: {level}, {goal}, {days}, {minutes_line}, {frequency_line},
///          {equipment}, {header}, {day_rule}, {cycle_rule}
pub const PLAN_PROMPT_TEMPLATE: &str = "请为羽毛球学员制定一份可直接拿来练的训练计划。

学员水平：{level}
目标：{goal}
总天数：{days} 天{minutes_line}{frequency_line}
器材/场地：{equipment}

输出要求：
- 只输出 CSV（逗号分隔），不要输出任何多余解释文字，不要使用代码块
- 第一行必须是表头：{header}
- {day_rule}
- 从第 1 天到第 {days} 天每天恰好一行，按顺序排列，不要跳号，不要重复
- DurationMin 必须是整数（分钟）
- Intensity 只能是 低/中/高
- Drills 用“;”分隔多个练习点，字段内不要出现逗号
- Notes 写注意事项或常见错误纠正{cycle_rule}";

/// Replace: {minutes}
pub const MINUTES_LINE_TEMPLATE: &str = "\n每次训练时长：{minutes} 分钟";

/// Replace: {frequency}
pub const FREQUENCY_LINE_TEMPLATE: &str = "\n每周训练频率：{frequency} 次/周";

/// Replace: {frequency}
pub const CYCLE_RULE_TEMPLATE: &str =
    "\n- 总天数超过 7 天：以每周 {frequency} 次训练为一个周期循环安排，后面的周重复同一套周计划并逐步加量，不要随意编排新的训练日";

/// Replace: {last}
pub const ZERO_PADDED_DAY_RULE: &str = "Day 用 01,02,... 这种两位数，从 Day=01 开始，连续到 Day={last}";

/// Replace: {last}
pub const PREFIXED_DAY_RULE: &str = "Day 用 D1,D2,... 这种格式，从 Day=D1 开始，连续到 Day={last}";

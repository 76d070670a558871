//! # 终端输出
//!
//! 状态行统一为 `[标签] 消息` 格式；错误写到 stderr，其余写到 stdout。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 60;

fn tagged(tag: ColoredString, msg: &str) -> String {
    format!("{} {}", tag, msg)
}

fn rule() -> ColoredString {
    "─".repeat(RULE_WIDTH).dimmed()
}

pub fn print_success(msg: &str) {
    println!("{}", tagged("[OK]".green().bold(), msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]".red().bold(), msg));
}

pub fn print_warning(msg: &str) {
    println!("{}", tagged("[WARN]".yellow().bold(), msg));
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]".blue().bold(), msg));
}

/// 未生成的输出（如拟合失败时的标定图）
pub fn print_skip(msg: &str) {
    println!("{}", tagged("[SKIP]".dimmed(), msg));
}

/// 被标记的文件或组：`[FLAG] 来源 (错误类别) 说明`
pub fn print_flag(subject: &str, kind: &str, detail: &str) {
    let body = format!(
        "{} {} {}",
        subject,
        format!("({})", kind).yellow(),
        detail.dimmed()
    );
    println!("{}", tagged("[FLAG]".magenta().bold(), &body));
}

/// 拟合结果：ε、截距与 R²
pub fn print_fit(slope: f64, intercept: f64, r_squared: f64) {
    let body = format!(
        "ε = {} L·mol⁻¹·cm⁻¹, intercept = {:.6}, R² = {}",
        format!("{:.2}", slope).bold(),
        intercept,
        format!("{:.4}", r_squared).bold()
    );
    println!("{}", tagged("[FIT]".cyan().bold(), &body));
}

/// 分节标题，上下各一条分隔线
pub fn print_header(title: &str) {
    println!("\n{}\n  {}\n{}\n", rule(), title.bold(), rule());
}

pub fn print_separator() {
    println!("{}", rule());
}

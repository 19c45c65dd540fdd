//! Output formatting for human and JSON modes
//!
//! Every report can be rendered either as human-readable text or as
//! machine-parseable JSON. Human output is colored by [`Tone`].

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::api::{FormatData, StatsData, ValidationData};
use crate::catalog::{FlagInfo, flag_label, hcpcs_label, state_name};
use crate::dataset::IssueSeverity;
use crate::exclusions::ExclusionsReport;
use crate::explain::flag_marker;
use crate::format::{
    PLACEHOLDER, Tone, decile_tone, format_cpc, format_growth, format_money, format_number,
    format_percent, format_ratio, ml_score_tone,
};
use crate::ml::MlSummary;
use crate::profile::ProviderProfile;
use crate::search::SearchResults;
use crate::states::{StateReport, StatesReport};
use crate::trends::TrendsReport;
use crate::watchlist::WatchlistReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Width of text bar charts, in characters
const BAR_WIDTH: usize = 30;

/// Color `text` with a display tone
#[must_use]
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Red => text.red().bold(),
        Tone::Orange => text.truecolor(249, 115, 22),
        Tone::Amber => text.truecolor(245, 158, 11),
        Tone::Yellow => text.yellow(),
        Tone::Green => text.green(),
        Tone::Blue => text.blue(),
        Tone::Purple => text.magenta(),
        Tone::Cyan => text.cyan(),
        Tone::Slate => text.dimmed(),
    }
}

/// Horizontal bar for a percentage in `[0, 100]`
#[must_use]
pub fn bar(percent: f64) -> String {
    let clamped = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(BAR_WIDTH - filled))
}

const fn or_placeholder(s: &str) -> &str {
    if s.is_empty() { PLACEHOLDER } else { s }
}

fn location(city: &str, state: &str) -> String {
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (true, false) => state.to_string(),
        (false, true) => city.to_string(),
        (true, true) => PLACEHOLDER.to_string(),
    }
}

/// A report that can be printed in either output mode
pub trait Render: Serialize {
    /// Print human-readable text to stdout
    fn render_human(&self);

    /// Print pretty JSON to stdout
    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }

    /// Render the result based on output mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl Render for OperationResult {
    fn render_human(&self) {
        println!("{}", self.message);
    }
}

/// The flag catalog
#[derive(Debug, Serialize)]
pub struct FlagList {
    /// Known flags
    pub flags: Vec<FlagInfo>,
}

impl Render for FlagList {
    fn render_human(&self) {
        println!("Flags:\n");
        for f in &self.flags {
            println!("  {} {}", paint(&f.label, f.tone), format!("({})", f.key).dimmed());
            println!("      {}\n", f.description);
        }
    }
}

// =============================================================================
// OVERVIEW
// =============================================================================

impl Render for StatsData {
    fn render_human(&self) {
        println!("{}", "Medicaid Provider Spending".bold());
        println!("  Total paid:  {}", self.total_paid);
        println!("  Records:     {}", self.records);
        println!("  Providers:   {}", self.providers);
    }
}

impl Render for ValidationData {
    fn render_human(&self) {
        println!("Validating fixtures in {}...\n", self.data_dir);
        if self.issues.is_empty() {
            println!("{}", "All fixtures look good.".green());
            return;
        }
        for issue in &self.issues {
            let tag = match issue.severity {
                IssueSeverity::Error => paint("ERROR", Tone::Red),
                IssueSeverity::Warning => paint("WARN ", Tone::Amber),
            };
            println!("  {tag} {}: {}", issue.file, issue.message);
        }
        println!("\n{} error(s), {} warning(s)", self.errors, self.warnings);
    }
}

impl Render for FormatData {
    fn render_human(&self) {
        println!("{}", self.output);
    }
}

// =============================================================================
// PROVIDERS
// =============================================================================

impl Render for WatchlistReport {
    fn render_human(&self) {
        let s = &self.summary;
        println!("{}", "Unified Watchlist".bold());
        println!(
            "  {} providers  {} critical  {} high  {} elevated  {} ML  {} total",
            s.total,
            paint(&s.critical.to_string(), Tone::Red),
            paint(&s.high.to_string(), Tone::Orange),
            paint(&s.elevated.to_string(), Tone::Amber),
            paint(&s.ml_flag.to_string(), Tone::Purple),
            format_money(s.total_spending)
        );

        if self.rows.is_empty() {
            println!("\nNo providers match these filters.");
            return;
        }

        println!("\nShowing {} of {} matching provider(s):\n", self.rows.len(), self.matched);
        for row in &self.rows {
            let score = row
                .ml_score
                .map_or_else(String::new, |m| format!("  ML {}", format_percent(m * 100.0)));
            println!(
                "  {:<9} {}  {}",
                paint(row.tier.label(), row.tier.tone()),
                row.name.bold(),
                format!("NPI {}", row.npi).dimmed()
            );
            println!(
                "            {}  {}  {} flag(s){score}",
                location(&row.city, &row.state),
                format_money(row.total_paid),
                row.flag_count
            );
            for (flag, summary) in row.flag_summaries() {
                println!("            {} {}: {summary}", flag_marker(&flag), flag_label(&flag));
            }
        }
    }
}

impl Render for ProviderProfile {
    fn render_human(&self) {
        println!("{}", self.name.bold());
        println!(
            "  NPI {}  {}  {}",
            self.npi,
            or_placeholder(&self.specialty),
            location(&self.city, &self.state_name)
        );
        println!("  Risk: {}", paint(self.risk.label(), self.risk.tone()));
        if let Some(score) = self.ml_score {
            println!(
                "  ML fraud similarity: {}",
                paint(&format_percent(score * 100.0), ml_score_tone(score))
            );
        }
        if self.limited_data {
            println!("  {}", "Limited data: no detailed billing file for this provider.".dimmed());
        }

        println!();
        println!("  Total paid:       {}", format_money(self.total_paid));
        println!("  Total claims:     {}", format_number(self.total_claims));
        println!("  Beneficiaries:    {}", format_number(self.total_benes));
        println!("  Avg per claim:    {}", format_cpc(Some(self.avg_per_claim)));
        println!("  Claims per bene:  {:.1}", self.claims_per_bene);
        if !self.limited_data {
            println!("  Growth:           {}", format_growth(self.growth_rate));
        }

        if !self.flags.is_empty() {
            println!("\n{}", "Flags".bold());
            for f in &self.flags {
                println!("  {} {}", flag_marker(&f.info.key), paint(&f.info.label, f.info.tone));
                println!("      {}", f.info.description);
                if !f.explanation.is_empty() {
                    println!("      {}", f.explanation.italic());
                }
            }
        }

        if !self.procedures.is_empty() {
            println!("\n{}", "Top procedures".bold());
            for p in &self.procedures {
                let decile = p.line.decile.as_deref().map_or_else(String::new, |d| {
                    format!("  {}", paint(d, decile_tone(d)))
                });
                println!(
                    "  {:<48} {:>8}  {}/claim  {} median{decile}",
                    hcpcs_label(&p.line.code),
                    format_money(p.line.paid),
                    format_cpc(p.line.provider_cpc),
                    format_ratio(p.line.cpc_ratio)
                );
            }
        }

        if !self.monthly.is_empty() {
            let max = self.monthly.iter().map(|m| m.paid).fold(0.0, f64::max);
            println!("\n{}", "Monthly billing".bold());
            for m in &self.monthly {
                let pct = if max > 0.0 { m.paid / max * 100.0 } else { 0.0 };
                println!("  {}  {}  {}", m.month, bar(pct), format_money(m.paid));
            }
        }
    }
}

impl Render for SearchResults {
    fn render_human(&self) {
        if self.hits.is_empty() {
            println!("No providers found for '{}'.", self.query);
            return;
        }

        let flagged: Vec<_> = self.flagged().collect();
        if !flagged.is_empty() {
            println!("{}", paint("Flagged providers", Tone::Red));
            for h in flagged {
                let score = h.ml_score.map_or_else(String::new, |m| {
                    format!("  ML {}", paint(&format_percent(m * 100.0), ml_score_tone(m)))
                });
                println!(
                    "  {}  NPI {}  {}{score}",
                    or_placeholder(&h.name).bold(),
                    h.npi,
                    location(&h.city, &h.state)
                );
            }
        }

        let clean: Vec<_> = self.clean().collect();
        if !clean.is_empty() {
            println!("{}", paint("Not flagged", Tone::Green));
            for h in clean {
                println!(
                    "  {}  NPI {}  {}  {}",
                    or_placeholder(&h.name),
                    h.npi,
                    location(&h.city, &h.state),
                    format_money(h.total_paid)
                );
            }
        }
    }
}

// =============================================================================
// GEOGRAPHY & TRENDS
// =============================================================================

impl Render for StatesReport {
    fn render_human(&self) {
        println!(
            "{} across {} states",
            format_money(self.national_total).bold(),
            self.rankings.len()
        );
        println!();
        for r in &self.rankings {
            println!(
                "  {:>2}. {:<22} {}  {:>8}  {}",
                r.rank,
                r.name,
                bar(r.bar_width),
                format_money(r.total_payments),
                format_percent(r.share)
            );
        }

        if !self.heat.is_empty() {
            println!("\n{}", "Flagged providers by state".bold());
            for cell in &self.heat {
                println!(
                    "  {}  {:<22} {:>4} flagged  {:.2} per 100K",
                    paint(&cell.code, cell.intensity.tone()),
                    cell.name,
                    cell.flagged_count,
                    cell.flags_per_capita
                );
            }
        }
    }
}

impl Render for StateReport {
    fn render_human(&self) {
        println!("{} ({})", self.name.bold(), self.code);
        println!("  Total paid:     {}", format_money(self.summary.total_payments));
        println!("  Claims:         {}", format_number(self.summary.total_claims));
        println!("  Beneficiaries:  {}", format_number(self.summary.total_benes));
        println!("  Providers:      {}", format_number(self.summary.provider_count));
        if let Some(risk) = &self.risk {
            println!(
                "  Flagged:        {} ({:.2} per 100K)",
                risk.flagged_count, risk.flags_per_capita
            );
        }

        if !self.yearly_trends.is_empty() {
            let max = self.yearly_trends.iter().map(|t| t.payments).fold(0.0, f64::max);
            println!("\n{}", "Yearly spending".bold());
            for t in &self.yearly_trends {
                let pct = if max > 0.0 { t.payments / max * 100.0 } else { 0.0 };
                println!("  {}  {}  {}", t.year, bar(pct), format_money(t.payments));
            }
        }

        if !self.top_providers.is_empty() {
            println!("\n{}", "Top providers".bold());
            for (i, p) in self.top_providers.iter().take(20).enumerate() {
                println!(
                    "  {:>2}. {}  {}  {}",
                    i + 1,
                    or_placeholder(&p.name),
                    format!("NPI {}", p.npi).dimmed(),
                    format_money(p.total_paid)
                );
            }
        }

        if !self.top_procedures.is_empty() {
            println!("\n{}", "Top procedures".bold());
            for p in &self.top_procedures {
                println!("  {:<48} {}", hcpcs_label(&p.code), format_money(p.payments));
            }
        }
    }
}

impl Render for TrendsReport {
    fn render_human(&self) {
        println!(
            "{} total, {} since {}",
            format_money(self.total_payments).bold(),
            format_growth(self.total_growth),
            self.years.first().map_or_else(|| PLACEHOLDER.to_string(), |y| y.year.to_string())
        );
        println!();
        for y in &self.years {
            let tone = if y.payment_growth >= 0.0 { Tone::Green } else { Tone::Red };
            println!(
                "  {}  {}  {:>8}  {}  {} claims",
                y.year,
                bar(y.bar_height),
                format_money(y.payments),
                paint(&format_growth(y.payment_growth), tone),
                format_number(y.claims)
            );
        }
    }
}

impl Render for ExclusionsReport {
    fn render_human(&self) {
        println!(
            "{} excluded provider(s) found in payment data",
            self.providers.len().to_string().bold()
        );

        if !self.by_state.is_empty() {
            println!("\n{}", "By state".bold());
            for t in self.by_state.iter().take(10) {
                println!("  {:<22} {}", state_name(&t.label), t.count);
            }
        }
        if !self.by_type.is_empty() {
            println!("\n{}", "By exclusion type".bold());
            for t in &self.by_type {
                println!("  {:>4}  {}", t.count, or_placeholder(&t.label));
            }
        }

        println!();
        for p in &self.providers {
            println!(
                "  {}  {}  {}  excluded {}",
                p.display_name.bold(),
                format!("NPI {}", p.npi).dimmed(),
                location(&p.city, &p.state),
                p.excl_date
            );
        }
    }
}

impl Render for MlSummary {
    fn render_human(&self) {
        println!("{}", "ML fraud similarity model".bold());
        println!("  AUC:        {:.4}", self.model_auc);
        println!("  Scored:     {}", format_number(self.total_providers));
        println!("  Small-provider flags: {}", self.small_provider_flags);

        if !self.features.is_empty() {
            println!("\n{}", "Features".bold());
            for f in &self.features {
                println!("  {}  {}", bar(f.bar_width), f.label);
            }
        }

        println!("\n{}", "Score distribution".bold());
        for p in &self.distribution {
            let score = p.score.map_or_else(
                || PLACEHOLDER.to_string(),
                |s| format!("{:.0}%", s * 100.0),
            );
            println!("  {:<13} {:>5}  {}", p.label, score, p.description.dimmed());
        }

        if !self.top_providers.is_empty() {
            println!("\n{}", "Highest scores".bold());
            for p in &self.top_providers {
                println!(
                    "  {}  {}  {}",
                    paint(&format_percent(p.provider.ml_score * 100.0), p.tone),
                    p.display_name,
                    location(&p.provider.city, &p.provider.state)
                );
            }
        }
    }
}

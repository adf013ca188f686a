//! Underwriting System CLI
//!
//! Command-line interface for projecting a single deal scenario

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use underwriting_system::projection::{
    IrrBand, ProjectionConfig, SensitivityGrid, EQUITY_MULTIPLE_TARGET, IRR_HURDLE_PCT,
};
use underwriting_system::report::write_projection_csv;
use underwriting_system::{ScenarioInputs, ScenarioLibrary, ScenarioRunner, UnderwritingAssumptions};

#[derive(Debug, Parser)]
#[command(name = "underwriting_system", version, about = "Project a deal scenario and its returns")]
struct Cli {
    /// Purchase price in dollars
    #[arg(long, default_value_t = 22_000_000.0)]
    purchase_price: f64,

    /// Exit cap rate in percent
    #[arg(long, default_value_t = 5.5)]
    exit_cap_rate: f64,

    /// Annual rent growth in percent
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    rent_growth: f64,

    /// Interest rate in percent
    #[arg(long, default_value_t = 6.5)]
    interest_rate: f64,

    /// Hold period in years
    #[arg(long, default_value_t = 5)]
    hold_period: u32,

    /// Capex budget in dollars
    #[arg(long, default_value_t = 1_500_000.0)]
    capex_budget: f64,

    /// Use a saved scenario from the built-in library instead of the flags above
    #[arg(long)]
    preset: Option<String>,

    /// JSON file overriding the underwriting assumptions
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Write the projection rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn inputs(&self) -> Result<ScenarioInputs> {
        match &self.preset {
            Some(name) => {
                let library = ScenarioLibrary::with_presets();
                Ok(library.find_by_name(name)?.inputs)
            }
            None => Ok(ScenarioInputs {
                purchase_price: self.purchase_price,
                exit_cap_rate: self.exit_cap_rate,
                rent_growth: self.rent_growth,
                interest_rate: self.interest_rate,
                hold_period: self.hold_period,
                capex_budget: self.capex_budget,
            }),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.inputs()?;

    let assumptions = match &cli.assumptions {
        Some(path) => UnderwritingAssumptions::from_json_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => UnderwritingAssumptions::default_underwriting(),
    };

    let runner = ScenarioRunner::with_assumptions(assumptions, ProjectionConfig::default());
    let result = runner.run(&inputs).context("Scenario evaluation failed")?;
    let grid = SensitivityGrid::for_inputs(&inputs)?;

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
        write_projection_csv(BufWriter::new(file), &result.projections)?;
    }

    if cli.json {
        let output = serde_json::json!({
            "result": result,
            "sensitivity": grid,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Underwriting System v{}", env!("CARGO_PKG_VERSION"));
    println!("===========================\n");

    println!("Scenario:");
    println!("  Purchase Price: ${:.0}", inputs.purchase_price);
    println!("  Exit Cap Rate:  {}%", inputs.exit_cap_rate);
    println!("  Rent Growth:    {}%", inputs.rent_growth);
    println!("  Interest Rate:  {}%", inputs.interest_rate);
    println!("  Hold Period:    {} years", inputs.hold_period);
    println!("  Capex Budget:   ${:.0}", inputs.capex_budget);
    println!();

    println!("{:>8} {:>14} {:>14} {:>16} {:>5}", "Year", "NOI", "CashFlow", "Valuation", "Exit");
    println!("{}", "-".repeat(61));
    for row in &result.projections {
        println!(
            "{:>8} {:>14.0} {:>14.0} {:>16.0} {:>5}",
            row.label(),
            row.noi,
            row.cash_flow,
            row.valuation,
            if row.is_exit_year { "*" } else { "" }
        );
    }

    let s = &result.summary;
    println!("\nReturns:");
    println!(
        "  Proj. Leveraged IRR: {:.2}%{}",
        s.estimated_irr,
        if s.irr_below_hurdle() { format!("  (below {}% hurdle)", IRR_HURDLE_PCT) } else { String::new() }
    );
    match s.cash_flow_irr {
        Some(irr) => println!("  Cash-Flow IRR:       {:.2}%", irr),
        None => println!("  Cash-Flow IRR:       n/a"),
    }
    println!(
        "  Equity Multiple:     {:.2}x{}",
        s.equity_multiple,
        if s.multiple_below_target() { format!("  (below {}x target)", EQUITY_MULTIPLE_TARGET) } else { String::new() }
    );
    println!("  Total Profit (Exit): ${:.2}M", s.total_profit / 1_000_000.0);

    println!("\nSensitivity (Exit Cap \\ Int Rate, illustrative IRR):");
    print!("{:>8}", "");
    for rate in &grid.interest_rates {
        print!(" {:>9}", format!("{:.1}%", rate));
    }
    println!();
    for (i, cap) in grid.exit_cap_rates.iter().enumerate() {
        print!("{:>8}", format!("{:.1}%", cap));
        for j in 0..grid.interest_rates.len() {
            if let (Some(irr), Some(band)) = (grid.cell(i, j), grid.band(i, j)) {
                let marker = match band {
                    IrrBand::Strong => '+',
                    IrrBand::Moderate => ' ',
                    IrrBand::Weak => '-',
                };
                print!(" {:>8}{}", format!("{:.1}%", irr), marker);
            }
        }
        println!();
    }

    if let Some(path) = &cli.csv {
        println!("\nProjection written to: {}", path.display());
    }

    Ok(())
}

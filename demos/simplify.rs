use clap::Parser;

use boolalg_rs::{Expr, Law, Notation, Simplifier, SimplifierConfig, VariableDomain};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Expression to simplify, e.g. "a (a+b)".
    #[arg(value_name = "EXPR")]
    expr: String,

    /// Input variables, in truth-table order (default: the variables of EXPR, sorted).
    #[clap(long, value_name = "NAMES", value_delimiter = ',')]
    inputs: Option<Vec<String>>,

    /// Only try this law.
    #[clap(long, value_name = "LAW")]
    law: Option<Law>,

    /// Notation for printed expressions.
    #[clap(long, value_name = "NOTATION", default_value = "mathematical")]
    notation: Notation,

    /// Compare a rewrite of EXPR against it instead of simplifying.
    #[clap(long, value_name = "CANDIDATE")]
    check: Option<String>,

    /// Maximum number of domain inputs.
    #[clap(long, value_name = "INT", default_value = "16")]
    max_inputs: u32,

    /// Log matching decisions.
    #[clap(long)]
    debug: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.debug {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let expr: Expr = args.expr.parse()?;
    let domain = match &args.inputs {
        Some(inputs) => VariableDomain::from_inputs(inputs.iter().map(|s| s.trim()))?,
        None => VariableDomain::infer(&expr),
    };
    log::info!("expression: {}", expr.display(args.notation));
    log::info!("inputs: {:?} ({} rows)", domain.inputs(), domain.row_count());

    let simplifier = Simplifier::new(SimplifierConfig::default().with_max_inputs(args.max_inputs));

    if let Some(candidate) = &args.check {
        let candidate: Expr = candidate.parse()?;
        let comparison = simplifier.compare(&domain, &expr, &candidate)?;
        if comparison.equivalent {
            println!("equivalent");
        } else {
            println!("NOT equivalent");
            println!("{:>10}  {}", "original", comparison.original);
            println!("{:>10}  {}", "candidate", comparison.candidate);
            for row in comparison.original.differences(&comparison.candidate) {
                let assignment: Vec<String> = domain
                    .inputs()
                    .iter()
                    .zip(comparison.original.assignment(row))
                    .map(|(name, value)| format!("{}={}", name, u8::from(value)))
                    .collect();
                println!("differs at {}", assignment.join(" "));
            }
        }
        return Ok(());
    }

    let steps: Vec<_> = match args.law {
        Some(law) => simplifier.simplify(&expr, &domain, law)?.into_iter().collect(),
        None => simplifier.possible_simplifications(&expr, &domain)?,
    };

    if steps.is_empty() {
        println!("no simplification applies");
    }
    for step in &steps {
        println!("{}", step.render(args.notation));
    }

    Ok(())
}

use clap::Parser;
use porta_moment::utils::logger;
use porta_moment::PortaMoment;

#[derive(Debug, Parser)]
#[command(name = "usage")]
#[command(about = "Walk through billing datetime handling in a local timezone")]
struct Args {
    #[arg(long, default_value = "2023-03-07 14:52:43")]
    wire_datetime: String,

    #[arg(long, default_value = "Europe/Paris")]
    timezone: String,

    #[arg(long, default_value = "130.0")]
    fee: f64,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

const LOCAL_RFC3339: &str = "%Y-%m-%dT%H:%M:%S%:z";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Converting billing wire string '{}'", args.wire_datetime);
    let moment = PortaMoment::from_wire_string(&args.wire_datetime, args.timezone.as_str())?;
    println!("Billing wire string (UTC):   {moment}");
    println!(
        "Local ({}):     {}",
        args.timezone,
        moment.format_local(LOCAL_RFC3339)
    );

    // Last second of the next day, the usual addon-product cutoff.
    let next_day_last = moment.next_day().last_moment_of_day();
    println!(
        "Last second of next day:     {} = '{next_day_last}' for the API",
        next_day_last.format_local(LOCAL_RFC3339)
    );

    // Product change pair over the coming month boundary, local midnight.
    let now = PortaMoment::new("now", args.timezone.as_str())?;
    let old_product_ends = now.last_day_of_this_month().last_moment_of_day();
    let new_product_starts = now.first_day_of_next_month().first_moment_of_day();
    println!("Coming month break point:");
    println!("  old product ends:  '{old_product_ends}'");
    println!("  new product starts:'{new_product_starts}'");

    println!(
        "Fee {:.2} prorated till end of month: {:.2}",
        args.fee,
        now.prorate_till_end_of_month(args.fee)
    );

    Ok(())
}

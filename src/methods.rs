use crate::reduce;

/// List all available reducing methods
pub fn list_methods() {
    println!();
    println!("🥒 cukemerge — Reducing methods");
    println!("{}", "━".repeat(55));
    println!();

    let strategies = reduce::all_strategies();

    for strategy in &strategies {
        println!("  📋 {} ", strategy.method());
        println!("     {}", strategy.description());
        println!();
    }

    println!("{}", "━".repeat(55));
    println!("  {} methods available", strategies.len());
    println!();
    println!("  Run `cukemerge merge run.json rerun.json --method merge-with-retest`");
    println!("  to count each rerun scenario once, with its latest outcome");
    println!();
}

//! Interactive CLI demo of the full Lyceum credential lifecycle.
//!
//! Walks through identity creation, ministry bootstrap, university and
//! student registration, a credit-token purchase, enrollment, grading,
//! and the relocation of the resulting diploma record to another
//! university. The output uses ANSI escape codes for colored,
//! storytelling-style terminal rendering.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use lyceum_contracts::state::Ministry;
use lyceum_protocol::config::{CREDIT_UNIT_SCALE, PASS_THRESHOLD};
use lyceum_protocol::identity::AccountKeypair;
use lyceum_protocol::pricing::{AcademicYear, ExperimentalFactor};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    LYCEUM  --  Academic Credential Ledger, Lifecycle Demo          {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    Version 0.1.0  |  Ed25519 + BLAKE3 + Bech32                     {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn subsection(text: &str) {
    println!("{DIM}{CYAN}  >> {text}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn address_display(name: &str, addr: &str, color: &str) {
    let prefix = &addr[..5];
    let suffix = &addr[addr.len().saturating_sub(8)..];
    println!(
        "  {color}{BOLD}{name}{RESET}  {DIM}{prefix}...{suffix}{RESET}  {DIM}({} chars){RESET}",
        addr.len()
    );
}

fn balance_row(name: &str, units: u64, color: &str) {
    println!(
        "  {color}{BOLD}{name:<12}{RESET}  {WHITE}{units:>12}{RESET} {DIM}credit units ({} credits){RESET}",
        units / CREDIT_UNIT_SCALE
    );
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let demo_start = Instant::now();
    banner();

    // -----------------------------------------------------------------------
    // Step 1: Identity Creation
    // -----------------------------------------------------------------------

    section(1, "Identity Generation");
    subsection("Generating Ed25519 keypairs and deriving Bech32 addresses...");

    let admin_kp = AccountKeypair::generate();
    let unir_kp = AccountKeypair::generate();
    let destino_kp = AccountKeypair::generate();
    let prof_kp = AccountKeypair::generate();
    let ada_kp = AccountKeypair::generate();

    let admin = admin_kp.account_id();
    let unir = unir_kp.account_id();
    let destino = destino_kp.account_id();
    let prof = prof_kp.account_id();
    let ada = ada_kp.account_id();

    println!();
    address_display("Ministry ", &admin.to_address(), WHITE);
    address_display("UNIR     ", &unir.to_address(), BLUE);
    address_display("Destino U", &destino.to_address(), MAGENTA);
    address_display("Dr. M.   ", &prof.to_address(), CYAN);
    address_display("Ada      ", &ada.to_address(), GREEN);
    println!();
    success("All addresses start with 'lyc1' and pass Bech32 roundtrip verification");

    // -----------------------------------------------------------------------
    // Step 2: Ministry Bootstrap & Registration
    // -----------------------------------------------------------------------

    section(2, "Ministry Bootstrap & Registration");
    subsection("Registering two universities, one professor, one student...");

    let mut ministry = Ministry::new(admin);
    ministry.register_university(&admin, unir, "UNIR")?;
    ministry.register_university(&admin, destino, "Universidad Destino")?;
    ministry.register_professor(&admin, prof, "Javier Montesinos")?;
    ministry.register_student(&admin, ada, "Ada")?;

    info(
        "Universities on the roll",
        &ministry.registry().universities().len().to_string(),
    );
    println!();
    println!("  {BOLD}{WHITE}--- Genesis Floats ---{RESET}");
    balance_row("UNIR", ministry.balance_of(&unir), BLUE);
    balance_row("Destino U", ministry.balance_of(&destino), MAGENTA);
    balance_row("Ada", ministry.balance_of(&ada), GREEN);
    println!();
    success("Each university registered with its full, final credit float");

    let genesis_total = ministry.ledger().total_issued();

    // -----------------------------------------------------------------------
    // Step 3: Credit Purchase
    // -----------------------------------------------------------------------

    section(3, "Credit Purchase: Ada buys 10 UNIR credits");
    subsection("Quoting the native price, then paying it to the wei...");

    let credits = 10u64;
    let wei = ministry.credits_to_payment(credits)?;
    info("Quoted price", &format!("{wei} wei"));

    let units = ministry.purchase_tokens(&ada, unir, credits, wei)?;
    info("Credit units received", &units.to_string());

    println!();
    println!("  {BOLD}{WHITE}--- Balances After Purchase ---{RESET}");
    balance_row("UNIR", ministry.balance_of(&unir), BLUE);
    balance_row("Ada", ministry.balance_of(&ada), GREEN);
    println!();
    info(
        "Ada's UNIR-provenance balance",
        &ministry.provenance_balance_of(&ada, &unir).to_string(),
    );
    success("Float moved university -> student; provenance recorded");

    // -----------------------------------------------------------------------
    // Step 4: Course Offering & Teaching Assignment
    // -----------------------------------------------------------------------

    section(4, "Course Offering: Calculo 1 (CAL1, 7 credits)");
    subsection("Creating the offering and assigning UNIR's grader...");

    let course = ministry.create_course_offering(
        &admin,
        "Calculo 1",
        "CAL1",
        7,
        ExperimentalFactor::Standard,
    )?;
    ministry.authorize_university_professor(&admin, course, unir, prof)?;

    info("Course id", &course.to_string());
    info(
        "Assigned professor",
        &ministry
            .offering(course)?
            .professor_for(&unir)
            .map(|p| p.to_address())
            .unwrap_or_default(),
    );
    success("Offering created; teaching roster set by the central authority");

    // -----------------------------------------------------------------------
    // Step 5: Enrollment (quote, then commit)
    // -----------------------------------------------------------------------

    section(5, "Enrollment: Ada matriculates for 2025/26");

    let tuition = ministry.tuition_for(course, &ada)?;
    info("Tuition quote", &format!("{tuition} credit units"));

    let academic_year = AcademicYear::parse("2025/26")?;
    let record = ministry.enroll(&ada, course, unir, academic_year)?;
    info("Enrollment record id", &record.to_string());

    println!();
    balance_row("Ada", ministry.balance_of(&ada), GREEN);
    println!();
    success("Record minted, owned by UNIR until it is graded");

    // -----------------------------------------------------------------------
    // Step 6: Grading
    // -----------------------------------------------------------------------

    section(6, "Grading: Dr. Montesinos awards 700 / 1000");
    subsection(&format!("Pass threshold is {PASS_THRESHOLD}..."));

    let status = ministry.evaluate(&prof, course, &ada, record, 700)?;
    info("Resulting status", &status.to_string());
    info(
        "Diploma owner",
        &ministry.offering(course)?.owner_of(record)?.to_address(),
    );
    success("Passed: the record now belongs to Ada");

    // -----------------------------------------------------------------------
    // Step 7: Relocation
    // -----------------------------------------------------------------------

    section(7, "Relocation: Ada moves her diploma to Universidad Destino");

    ministry.relocate(&ada, course, record, destino)?;
    let relocated = ministry.offering(course)?.record(record)?;
    info("New owner", &relocated.owner.to_address());
    info("New university", &relocated.university.to_address());
    success("Credit recognition transferred");

    // -----------------------------------------------------------------------
    // Final Summary
    // -----------------------------------------------------------------------

    let total_held = ministry.ledger().total_held();

    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    DEMO COMPLETE -- Final Summary                                  {RESET}"
    );
    println!();
    println!("  {BOLD}{WHITE}Final Balances:{RESET}");
    println!("  {DIM}----------------------------------------------{RESET}");
    balance_row("UNIR", ministry.balance_of(&unir), BLUE);
    balance_row("Destino U", ministry.balance_of(&destino), MAGENTA);
    balance_row("Ada", ministry.balance_of(&ada), GREEN);
    println!();
    println!(
        "  {ITALIC}{DIM}Conservation check: {total_held} units held across all accounts, {genesis_total} issued at genesis{RESET}"
    );
    assert_eq!(total_held, genesis_total);

    println!();
    println!(
        "  {BOLD}{GREEN}Total demo time: {:.2}ms{RESET}",
        demo_start.elapsed().as_secs_f64() * 1000.0
    );
    println!();
    Ok(())
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! ClientSideEye CLI
//!
//! Scans pages for client-side gated controls and reports them to the local
//! bridge.

use std::env;
use std::process::ExitCode;

use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use clientsideeye::{
    scan_and_send, scan_target, BridgeClient, BridgeConfig, BridgeLocator, BridgeSink, FindHints,
    Finding, FindingExport, FindingFilter, HtmlAnalyzer, HttpClient, JsonSink, PageLoader,
    ScanConfig, ScanOutcome, Target,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clientsideeye=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let opts = match Options::parse(&args[2..]) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    match args[1].as_str() {
        "scan" => match opts.require_target("scan") {
            Some(target) => scan(&target, &opts).await,
            None => ExitCode::from(1),
        },
        "send" => match opts.require_target("send") {
            Some(target) => send(&target, &opts).await,
            None => ExitCode::from(1),
        },
        "analyze" => match opts.require_target("analyze") {
            Some(target) => analyze(&target, &opts).await,
            None => ExitCode::from(1),
        },
        "hints" => match opts.positional.first() {
            Some(evidence) => hints(evidence, &opts).await,
            None => {
                eprintln!("Usage: clientsideeye hints <evidence|->");
                ExitCode::from(1)
            }
        },
        "probe" => probe().await,
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("clientsideeye {}", clientsideeye::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"ClientSideEye - find controls that are only disabled or hidden client-side

USAGE:
    clientsideeye <COMMAND> [OPTIONS]

COMMANDS:
    scan <target>       Scan a page and print findings
    send <target>       Scan a page and submit findings to the local bridge
                        (with --json, write them to stdout instead)
    analyze <target>    Passive analysis of the served HTML (JSON export)
    hints <evidence>    DevTools hints for an evidence snippet (- reads stdin)
    probe               Look for a bridge on localhost ports 17373-17382
    help                Show this help message
    version             Show version information

TARGET:
    An http(s) URL, a path to an HTML file, or - for stdin

OPTIONS:
    --json              Print JSON instead of text
    --max <n>           Keep at most n findings per scan (default 50)
    --severity <list>   Only print these severities (e.g. high,medium)
    --host <substr>     Only print findings whose host contains substr

ENVIRONMENT:
    CLIENTSIDEEYE_BRIDGE_PORT   Probe only this port
    RUST_LOG                    Log filter (default clientsideeye=info)

EXAMPLES:
    clientsideeye scan https://app.example.com/admin
    clientsideeye send saved-page.html
    curl -s https://app.example.com | clientsideeye analyze - --severity high
"#
    );
}

/// Options shared by all commands
#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    json: bool,
    max: Option<usize>,
    filter: FindingFilter,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => opts.json = true,
                "--max" => {
                    let n = iter.next().ok_or("--max needs a number")?;
                    opts.max = Some(
                        n.parse()
                            .map_err(|_| format!("--max needs a number, got '{}'", n))?,
                    );
                }
                "--severity" => {
                    let list = iter.next().ok_or("--severity needs a list")?;
                    let severities = FindingFilter::parse_severities(list)?;
                    opts.filter = opts.filter.severities(severities);
                }
                "--host" => {
                    let host = iter.next().ok_or("--host needs a value")?;
                    opts.filter = opts.filter.host(host.as_str());
                }
                flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
                _ => opts.positional.push(arg.clone()),
            }
        }
        Ok(opts)
    }

    fn require_target(&self, command: &str) -> Option<Target> {
        let Some(raw) = self.positional.first() else {
            eprintln!("Usage: clientsideeye {} <url|file|->", command);
            return None;
        };
        match raw.parse() {
            Ok(t) => Some(t),
            Err(e) => {
                eprintln!("Invalid target '{}': {}", raw, e);
                None
            }
        }
    }

    fn scan_config(&self) -> ScanConfig {
        match self.max {
            Some(max) => ScanConfig::default().max_findings(max),
            None => ScanConfig::default(),
        }
    }
}

fn page_loader() -> Option<PageLoader> {
    match HttpClient::new() {
        Ok(client) => Some(PageLoader::new(client)),
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            None
        }
    }
}

fn bridge_sink(client: HttpClient) -> Option<BridgeSink> {
    match BridgeConfig::from_env() {
        Ok(config) => Some(BridgeSink::new(
            BridgeLocator::new(client.clone(), config.clone()),
            BridgeClient::new(client, config),
        )),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

/// Print findings as text or JSON; exit 2 when anything was printed
fn report(findings: Vec<Finding>, opts: &Options) -> ExitCode {
    let findings = opts.filter.apply(findings);

    if opts.json {
        match FindingExport::new(&findings).to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize findings: {}", e);
                return ExitCode::from(1);
            }
        }
    } else if findings.is_empty() {
        println!("\n[OK] No findings");
    } else {
        println!("\n=== Findings ({}) ===", findings.len());
        for f in &findings {
            println!("\n[{}] {} (confidence {})", f.severity, f.title, f.confidence);
            println!("  Type: {}", f.finding_type);
            if !f.url.is_empty() {
                println!("  URL: {}", f.url);
            }
            println!("  {}", f.summary);
            println!("  Evidence: {}", f.evidence);
        }
    }

    if findings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

async fn scan(target: &Target, opts: &Options) -> ExitCode {
    let Some(loader) = page_loader() else {
        return ExitCode::from(1);
    };

    match scan_target(&loader, target, &opts.scan_config()).await {
        Ok(result) => {
            if result.truncated() {
                tracing::info!(
                    "Kept {} of {} findings",
                    result.findings.len(),
                    result.total_matches
                );
            }
            report(result.findings, opts)
        }
        Err(e) => {
            eprintln!("{}", ScanOutcome::from_error(&e));
            ExitCode::from(1)
        }
    }
}

async fn send(target: &Target, opts: &Options) -> ExitCode {
    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };
    let loader = PageLoader::new(client.clone());
    let config = opts.scan_config();

    // --json skips the bridge and writes the export to stdout
    if opts.json {
        let sink = JsonSink::new(std::io::stdout());
        let outcome = scan_and_send(&loader, target, &config, &sink).await;
        if let ScanOutcome::Submitted(_) = outcome {
            return ExitCode::SUCCESS;
        }
        eprintln!("{}", outcome);
        return if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        };
    }

    let Some(sink) = bridge_sink(client) else {
        return ExitCode::from(1);
    };
    let outcome = scan_and_send(&loader, target, &config, &sink).await;

    if let ScanOutcome::BridgeUnreachable { .. } = outcome {
        if let Some(text) = sink.locator().probe_failure_text() {
            eprintln!("{}", text);
        }
    }
    println!("{}", outcome);

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

async fn analyze(target: &Target, opts: &Options) -> ExitCode {
    let Some(loader) = page_loader() else {
        return ExitCode::from(1);
    };
    let page = match loader.load(target).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    match HtmlAnalyzer::new().analyze(&page.url_string(), &page.html) {
        Ok(findings) => {
            let opts = Options {
                json: true,
                positional: Vec::new(),
                max: opts.max,
                filter: opts.filter.clone(),
            };
            let findings = match opts.max {
                Some(max) => findings.into_iter().take(max).collect(),
                None => findings,
            };
            report(findings, &opts)
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn hints(evidence: &str, opts: &Options) -> ExitCode {
    let evidence = if evidence == "-" {
        let mut buf = String::new();
        if let Err(e) = tokio::io::stdin().read_to_string(&mut buf).await {
            eprintln!("Failed to read stdin: {}", e);
            return ExitCode::from(1);
        }
        buf
    } else {
        evidence.to_string()
    };

    let hints = FindHints::build(&evidence);
    if opts.json {
        match serde_json::to_string_pretty(&hints) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize hints: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        if !hints.best_selector.is_empty() {
            println!("Best selector: {}", hints.best_selector);
        }
        println!("\n=== Hints ===");
        for hint in &hints.hints {
            println!("  - {}", hint);
        }
        println!("\n=== Reveal snippet ===\n{}", hints.reveal_snippet);
    }
    ExitCode::SUCCESS
}

async fn probe() -> ExitCode {
    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };
    let Some(sink) = bridge_sink(client) else {
        return ExitCode::from(1);
    };
    let locator = sink.locator();

    match locator.resolve().await {
        Some(base) => {
            println!("Bridge: {}", base);
            ExitCode::SUCCESS
        }
        None => {
            if let Some(text) = locator.probe_failure_text() {
                eprintln!("{}", text);
            }
            let config = locator.config();
            println!(
                "{}",
                ScanOutcome::BridgeUnreachable {
                    first_port: config.first_port(),
                    last_port: config.last_port(),
                }
            );
            ExitCode::from(1)
        }
    }
}

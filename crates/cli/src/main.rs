use clap::{Parser, Subcommand};
use scrolly_core::{report, Page, PageConfig};

#[derive(Parser)]
#[command(name = "scrolly", about = "Headless scroll-effects engine: simulate reveal & counter animations without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an HTML file and list its animated elements
    Scan {
        /// The HTML file to load (use - for stdin)
        file: String,

        /// Output as JSON instead of compact format
        #[arg(long)]
        json: bool,

        /// Viewport size as WxH (default: 1920x1080)
        #[arg(long, default_value = "1920x1080")]
        viewport: String,
    },
    /// Simulate a scroll/clock timeline and print the resulting state
    Run {
        /// The HTML file to load (use - for stdin)
        file: String,

        /// Scroll position before the clock starts
        #[arg(long, default_value_t = 0.0)]
        scroll_to: f32,

        /// Milliseconds per frame
        #[arg(long, default_value_t = 16.0)]
        step: f64,

        /// Number of frames to advance
        #[arg(long, default_value_t = 125)]
        frames: u32,

        /// Print a report after every frame instead of only the last
        #[arg(long)]
        trace: bool,

        /// Output as JSON instead of compact format
        #[arg(long)]
        json: bool,

        /// Viewport size as WxH (default: 1920x1080)
        #[arg(long, default_value = "1920x1080")]
        viewport: String,
    },
}

fn parse_viewport(s: &str) -> (f32, f32) {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() == 2 {
        let w = parts[0].parse().unwrap_or(1920.0);
        let h = parts[1].parse().unwrap_or(1080.0);
        (w, h)
    } else {
        (1920.0, 1080.0)
    }
}

fn read_html(file: &str) -> String {
    if file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    } else {
        std::fs::read_to_string(file).expect("Failed to read file")
    }
}

fn load_page(file: &str, viewport: &str) -> Page {
    let html = read_html(file);
    let (vw, vh) = parse_viewport(viewport);
    let config = PageConfig {
        viewport_width: vw,
        viewport_height: vh,
        ..Default::default()
    };

    match Page::load(&html, config) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            file,
            json,
            viewport,
        } => {
            let page = load_page(&file, &viewport);
            print_report(&page, json);
        }
        Commands::Run {
            file,
            scroll_to,
            step,
            frames,
            trace,
            json,
            viewport,
        } => {
            let mut page = load_page(&file, &viewport);
            page.scroll_to(scroll_to);

            for _ in 0..frames {
                page.advance(step);
                if trace {
                    print_report(&page, json);
                    println!("---");
                }
            }

            if !trace {
                print_report(&page, json);
            }
        }
    }
}

fn print_report(page: &Page, as_json: bool) {
    let report = page.report();
    if as_json {
        println!("{}", report.to_json());
    } else {
        println!("vp: {}x{}", report.vp[0] as i32, report.vp[1] as i32);
        println!(
            "scroll: {},{}",
            report.scroll[0] as i32, report.scroll[1] as i32
        );
        println!("t: {}ms", report.clock_ms as i64);
        println!(
            "counters: {}, reveals: {}",
            report.counters.len(),
            report.reveals.len()
        );
        let compact = report::to_compact_string(&report);
        if !compact.is_empty() {
            println!("{}", compact);
        }
    }
}

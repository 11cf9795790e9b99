use cpm_engine::{
    Scheduler, load_project_from_json, render_table, result_to_dataframe, save_schedule_to_csv,
};
use std::env;
use std::fs::File;
use std::process;

fn usage() -> ! {
    eprintln!("usage: cli <project.json> [--csv <out.csv>] [--json <out.json>]");
    process::exit(2);
}

fn main() {
    let mut args = env::args().skip(1);
    let Some(input_path) = args.next() else {
        usage();
    };

    let mut csv_out: Option<String> = None;
    let mut json_out: Option<String> = None;
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--csv" => match args.next() {
                Some(path) => csv_out = Some(path),
                None => usage(),
            },
            "--json" => match args.next() {
                Some(path) => json_out = Some(path),
                None => usage(),
            },
            _ => usage(),
        }
    }

    let input = match load_project_from_json(&input_path) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: failed to load {input_path}: {err}");
            process::exit(2);
        }
    };

    let scheduler = Scheduler::new();
    let result = scheduler.run(&input);

    println!("{}", result.summary().to_cli_summary());

    if !result.schedulable {
        if let Some(err) = &result.error {
            eprintln!("error: {err}");
        }
        process::exit(2);
    }

    if let Some(err) = &result.error {
        // Non-fatal: infeasible target finish, surfaced as negative float.
        eprintln!("warning: {err}");
    }

    match result_to_dataframe(&result) {
        Ok(df) => print!("{}", render_table(&df)),
        Err(err) => {
            eprintln!("error: failed to build schedule table: {err}");
            process::exit(2);
        }
    }

    if let Some(path) = csv_out {
        if let Err(err) = save_schedule_to_csv(&result, &path) {
            eprintln!("error: failed to write {path}: {err}");
            process::exit(2);
        }
    }

    if let Some(path) = json_out {
        let write = File::create(&path)
            .map_err(|err| err.to_string())
            .and_then(|file| {
                serde_json::to_writer_pretty(file, &result).map_err(|err| err.to_string())
            });
        if let Err(err) = write {
            eprintln!("error: failed to write {path}: {err}");
            process::exit(2);
        }
    }
}

use crate::schedule::ScheduleResult;
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

/// Project a computed schedule into a DataFrame, one row per task, dates as
/// the Date dtype. Presentation only; the engine never reads this back.
pub fn result_to_dataframe(result: &ScheduleResult) -> PolarsResult<DataFrame> {
    let height = result.tasks.len();
    let mut ids: Vec<i32> = Vec::with_capacity(height);
    let mut names: Vec<&str> = Vec::with_capacity(height);
    let mut kinds: Vec<&str> = Vec::with_capacity(height);
    let mut durations: Vec<i64> = Vec::with_capacity(height);
    let mut early_starts: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut early_finishes: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut late_starts: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut late_finishes: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut floats: Vec<Option<i64>> = Vec::with_capacity(height);
    let mut criticals: Vec<bool> = Vec::with_capacity(height);

    for scheduled in &result.tasks {
        ids.push(scheduled.task.id);
        names.push(scheduled.task.name.as_str());
        kinds.push(scheduled.task.kind.as_str());
        durations.push(scheduled.task.duration_days);
        early_starts.push(scheduled.early_start.map(date_to_i32));
        early_finishes.push(scheduled.early_finish.map(date_to_i32));
        late_starts.push(scheduled.late_start.map(date_to_i32));
        late_finishes.push(scheduled.late_finish.map(date_to_i32));
        floats.push(scheduled.total_float);
        criticals.push(scheduled.is_critical);
    }

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("duration_days"), durations).into_column(),
        Series::new(PlSmallStr::from_static("early_start"), early_starts)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("early_finish"), early_finishes)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("late_start"), late_starts)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("late_finish"), late_finishes)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("total_float"), floats).into_column(),
        Series::new(PlSmallStr::from_static("is_critical"), criticals).into_column(),
    ];

    DataFrame::new(columns)
}

/// Render a DataFrame as an aligned text table.
pub fn render_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |av: &AnyValue| -> String {
        match av {
            AnyValue::Null => String::new(),
            AnyValue::Int32(v) => v.to_string(),
            AnyValue::Int64(v) => v.to_string(),
            AnyValue::Boolean(v) => v.to_string(),
            AnyValue::String(s) => s.to_string(),
            other => other.to_string(),
        }
    };

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = cell(av);
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = match col.get(row_idx) {
                Ok(ref av) => cell(av),
                Err(_) => String::new(),
            };
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

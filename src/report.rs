use crate::model::attendance::AttendanceRecord;

pub const CSV_HEADER: [&str; 5] = ["ID", "Roll", "Name", "Date", "Time"];

/// Serialises the log with a fixed column order, one row per record.
pub fn export_csv(records: &[AttendanceRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.id.to_string().as_str(),
            record.roll.as_str(),
            record.name.as_str(),
            record.date.as_str(),
            record.time.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

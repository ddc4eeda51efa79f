//! Issuing time-limited scan QR codes.

use crate::{error::AppError, model::expiry::ExpiryLabel};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{Duration, NaiveDateTime};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

pub struct QrTicket {
    pub scan_url: String,
    pub expiry: ExpiryLabel,
    pub png: Vec<u8>,
}

impl QrTicket {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Builds the scan URL expiring `validity` after `now` and renders it.
/// The image is kept in memory; the deployment filesystem may be read-only.
pub fn issue(base_url: &str, now: NaiveDateTime, validity: Duration) -> Result<QrTicket, AppError> {
    let expiry = ExpiryLabel::after(now, validity);
    let scan_url = scan_url(base_url, expiry);
    let png = render_png(&scan_url)?;

    Ok(QrTicket {
        scan_url,
        expiry,
        png,
    })
}

pub fn scan_url(base_url: &str, expiry: ExpiryLabel) -> String {
    format!("{}/scan?exp={}", base_url.trim_end_matches('/'), expiry)
}

pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes())?;
    let image = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 40, 30)
            .unwrap()
    }

    #[test]
    fn ticket_expires_two_minutes_ahead() {
        let ticket = issue("http://localhost:5000/", now(), Duration::minutes(2)).unwrap();

        assert_eq!(ticket.expiry.to_string(), "09:42");
        assert_eq!(ticket.scan_url, "http://localhost:5000/scan?exp=09:42");
        assert!(ticket.png.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn data_uri_embeds_the_png() {
        let ticket = issue("https://attend.example.edu", now(), Duration::minutes(2)).unwrap();
        let uri = ticket.data_uri();

        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), ticket.png);
    }
}

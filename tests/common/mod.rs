// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures: JPEG photos carrying generated EXIF blocks.
#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Builds a small JPEG with optional capture time and GPS position.
#[derive(Debug, Clone)]
pub struct PhotoBuilder {
    time: Option<(Tag, String)>,
    position: Option<(f64, f64)>,
    size: (u32, u32),
}

impl PhotoBuilder {
    pub fn new() -> Self {
        Self {
            time: None,
            position: None,
            size: (32, 32),
        }
    }

    pub fn taken_at(self, time: &str) -> Self {
        self.with_time_tag(Tag::DateTimeOriginal, time)
    }

    pub fn with_time_tag(mut self, tag: Tag, time: &str) -> Self {
        self.time = Some((tag, time.to_string()));
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some((latitude, longitude));
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn write(&self, path: &Path) {
        let mut fields = vec![ascii(Tag::Make, "OdoLens Test")];
        if let Some((tag, time)) = &self.time {
            fields.push(ascii(*tag, time));
        }
        if let Some((latitude, longitude)) = self.position {
            let lat_ref = if latitude < 0.0 { "S" } else { "N" };
            let lon_ref = if longitude < 0.0 { "W" } else { "E" };
            fields.push(ascii(Tag::GPSLatitudeRef, lat_ref));
            fields.push(dms(Tag::GPSLatitude, latitude.abs()));
            fields.push(ascii(Tag::GPSLongitudeRef, lon_ref));
            fields.push(dms(Tag::GPSLongitude, longitude.abs()));
        }

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).expect("write EXIF block");
        let tiff = tiff.into_inner();

        let (width, height) = self.size;
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 90, 90])));
        let mut jpeg = Cursor::new(Vec::new());
        image
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .expect("encode JPEG");
        let jpeg = jpeg.into_inner();

        // SOI, then an APP1 segment holding the EXIF block, then the rest.
        let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("EXIF block fits APP1");
        let mut bytes = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
        bytes.extend_from_slice(&jpeg[..2]);
        bytes.extend_from_slice(&[0xFF, 0xE1]);
        bytes.extend_from_slice(&segment_len.to_be_bytes());
        bytes.extend_from_slice(b"Exif\0\0");
        bytes.extend_from_slice(&tiff);
        bytes.extend_from_slice(&jpeg[2..]);

        std::fs::write(path, bytes).expect("write photo");
    }
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

/// Degrees, minutes and seconds, seconds to 1/10000.
fn dms(tag: Tag, degrees: f64) -> Field {
    let whole = degrees.trunc();
    let minutes_f = (degrees - whole) * 60.0;
    let minutes = minutes_f.trunc();
    let seconds = ((minutes_f - minutes) * 60.0 * 10_000.0).round();
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational {
                num: whole as u32,
                denom: 1,
            },
            Rational {
                num: minutes as u32,
                denom: 1,
            },
            Rational {
                num: seconds as u32,
                denom: 10_000,
            },
        ]),
    }
}

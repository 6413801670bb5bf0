//! GeoTIFF reading and writing with the pure-Rust `tiff` codec.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use num_traits::NumCast;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tracing::warn;

use crate::errors::{GeoError, Result};
use crate::geo_transform::{GeoTransform, GeoTransformEx};
use crate::raster::{Buffer, Raster, RasterType};

const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const RASTER_PIXEL_IS_POINT: u16 = 2;
const USER_DEFINED: u16 = 32767;

const IDENTITY: GeoTransform = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

pub(crate) fn read<T: RasterType>(path: &Path) -> Result<Raster<T>> {
    let file = BufReader::new(File::open(path)?);
    decode(file)
}

fn decode<T: RasterType, R: Read + Seek>(reader: R) -> Result<Raster<T>> {
    let mut decoder = Decoder::new(reader)?;
    let (width, height) = decoder.dimensions()?;
    let (cols, rows) = (width as usize, height as usize);
    let samples = decoder
        .get_tag_u32(Tag::SamplesPerPixel)
        .map(|s| s as usize)
        .unwrap_or(1)
        .max(1);

    let geo_keys = decoder
        .get_tag_u16_vec(Tag::GeoKeyDirectoryTag)
        .map(|directory| GeoKeys::parse(&directory))
        .unwrap_or_default();
    let geo_transform = match read_geo_transform(&mut decoder, &geo_keys) {
        Some(transform) => transform,
        None => {
            warn!("raster has no georeferencing tags, using identity transform");
            IDENTITY
        }
    };
    let no_data = decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .ok()
        .and_then(|value| value.trim_matches(char::from(0)).trim().parse::<f64>().ok());

    let cells: Vec<T> = match decoder.read_image()? {
        DecodingResult::U8(buf) => cast_cells(buf)?,
        DecodingResult::U16(buf) => cast_cells(buf)?,
        DecodingResult::U32(buf) => cast_cells(buf)?,
        DecodingResult::U64(buf) => cast_cells(buf)?,
        DecodingResult::I8(buf) => cast_cells(buf)?,
        DecodingResult::I16(buf) => cast_cells(buf)?,
        DecodingResult::I32(buf) => cast_cells(buf)?,
        DecodingResult::I64(buf) => cast_cells(buf)?,
        DecodingResult::F32(buf) => cast_cells(buf)?,
        DecodingResult::F64(buf) => cast_cells(buf)?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(GeoError::UnsupportedDataType(
                "unsupported TIFF sample format".to_string(),
            ))
        }
    };

    if cells.len() != cols * rows * samples {
        return Err(GeoError::BadArgument(format!(
            "decoded {} cells for a {cols}x{rows} image with {samples} samples",
            cells.len()
        )));
    }

    let bands = deinterleave(cells, (cols, rows), samples);
    Ok(Raster::from_bands(bands, geo_transform)?.with_metadata(geo_keys.epsg(), no_data))
}

fn cast_cells<S: NumCast + Copy + std::fmt::Debug, T: RasterType>(buf: Vec<S>) -> Result<Vec<T>> {
    buf.into_iter()
        .map(|value| {
            num_traits::cast::<S, T>(value).ok_or_else(|| {
                GeoError::UnsupportedDataType(format!(
                    "cell value {value:?} is not representable as {}",
                    T::data_type()
                ))
            })
        })
        .collect()
}

/// Split chunky `[s0, s1, .., s0, s1, ..]` samples into one buffer per sample.
fn deinterleave<T: RasterType>(cells: Vec<T>, size: (usize, usize), samples: usize) -> Vec<Buffer<T>> {
    if samples == 1 {
        return vec![Buffer::new(size, cells)];
    }
    (0..samples)
        .map(|band| {
            let data = cells.iter().skip(band).step_by(samples).copied().collect();
            Buffer::new(size, data)
        })
        .collect()
}

fn read_geo_transform<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    geo_keys: &GeoKeys,
) -> Option<GeoTransform> {
    if let Ok(matrix) = decoder.get_tag_f64_vec(Tag::ModelTransformationTag) {
        if matrix.len() >= 8 {
            let transform = [matrix[3], matrix[0], matrix[1], matrix[7], matrix[4], matrix[5]];
            return Some(geo_keys.to_pixel_is_area(transform));
        }
    }

    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok()?;
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok()?;
    if scale.len() < 2 || tiepoint.len() < 6 {
        return None;
    }

    // tiepoint: [I, J, K, X, Y, Z], scale: [ScaleX, ScaleY, ScaleZ]
    let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
    let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
    let transform = [origin_x, scale[0], 0.0, origin_y, 0.0, -scale[1]];
    Some(geo_keys.to_pixel_is_area(transform))
}

#[derive(Debug, Default, PartialEq)]
struct GeoKeys {
    raster_type: Option<u16>,
    geographic_type: Option<u16>,
    projected_type: Option<u16>,
}

impl GeoKeys {
    /// Parse a GeoKeyDirectoryTag: a 4-short header followed by
    /// `[key, location, count, value]` entries. Only inline values are read.
    fn parse(directory: &[u16]) -> GeoKeys {
        let mut keys = GeoKeys::default();
        let Some(header) = directory.get(..4) else {
            return keys;
        };
        let count = header[3] as usize;

        for entry in directory[4..].chunks_exact(4).take(count) {
            if entry[1] != 0 {
                continue;
            }
            match entry[0] {
                GT_RASTER_TYPE_GEO_KEY => keys.raster_type = Some(entry[3]),
                GEOGRAPHIC_TYPE_GEO_KEY => keys.geographic_type = Some(entry[3]),
                PROJECTED_CS_TYPE_GEO_KEY => keys.projected_type = Some(entry[3]),
                _ => {}
            }
        }
        keys
    }

    fn epsg(&self) -> Option<u32> {
        self.projected_type
            .or(self.geographic_type)
            .filter(|code| *code != 0 && *code != USER_DEFINED)
            .map(<u32 as From<u16>>::from)
    }

    /// GeoTIFF tie points of PixelIsPoint rasters refer to cell centers.
    fn to_pixel_is_area(&self, transform: GeoTransform) -> GeoTransform {
        if self.raster_type != Some(RASTER_PIXEL_IS_POINT) {
            return transform;
        }
        let (origin_x, origin_y) = transform.apply(-0.5, -0.5);
        [
            origin_x,
            transform[1],
            transform[2],
            origin_y,
            transform[4],
            transform[5],
        ]
    }
}

pub(crate) fn write<T: RasterType>(raster: &Raster<T>, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    encode(raster, file)
}

fn encode<T: RasterType, W: Write + Seek>(raster: &Raster<T>, writer: W) -> Result<()> {
    let band = raster.rasterband(1)?;
    let (cols, rows) = band.size();
    let data: Vec<f32> = band
        .read_band_as()
        .data
        .into_iter()
        .map(|value| {
            num_traits::cast::<T, f32>(value).ok_or_else(|| {
                GeoError::UnsupportedDataType(format!("cell value {value:?} is not representable as Float32"))
            })
        })
        .collect::<Result<_>>()?;

    let mut encoder = TiffEncoder::new(writer)?;
    let mut image = encoder.new_image::<Gray32Float>(cols as u32, rows as u32)?;

    let gt = raster.geo_transform();
    if gt.is_north_up() {
        let scale = [gt[1], -gt[5], 0.0];
        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &scale[..])?;
        let tiepoint = [0.0, 0.0, 0.0, gt[0], gt[3], 0.0];
        image
            .encoder()
            .write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
    } else {
        let matrix = [
            gt[1], gt[2], 0.0, gt[0], //
            gt[4], gt[5], 0.0, gt[3], //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        image
            .encoder()
            .write_tag(Tag::ModelTransformationTag, &matrix[..])?;
    }

    let geo_keys = geo_key_directory(raster.spatial_ref()?.map(|srs| (srs.epsg(), srs.is_geographic())));
    image
        .encoder()
        .write_tag(Tag::GeoKeyDirectoryTag, &geo_keys[..])?;

    if let Some(no_data) = raster.no_data_value() {
        image
            .encoder()
            .write_tag(Tag::GdalNodata, no_data.to_string().as_str())?;
    }

    image.write_data(&data)?;
    Ok(())
}

fn geo_key_directory(reference: Option<(Option<u32>, bool)>) -> Vec<u16> {
    let mut entries: Vec<[u16; 4]> = Vec::new();
    let epsg = reference.and_then(|(code, geographic)| {
        code.and_then(|code| u16::try_from(code).ok())
            .map(|code| (code, geographic))
    });

    let model_type = match epsg {
        Some((_, true)) => MODEL_TYPE_GEOGRAPHIC,
        _ => MODEL_TYPE_PROJECTED,
    };
    entries.push([GT_MODEL_TYPE_GEO_KEY, 0, 1, model_type]);
    entries.push([GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA]);
    match epsg {
        Some((code, true)) => entries.push([GEOGRAPHIC_TYPE_GEO_KEY, 0, 1, code]),
        Some((code, false)) => entries.push([PROJECTED_CS_TYPE_GEO_KEY, 0, 1, code]),
        None => {}
    }

    let mut directory = vec![1, 1, 0, entries.len() as u16];
    directory.extend(entries.into_iter().flatten());
    directory
}

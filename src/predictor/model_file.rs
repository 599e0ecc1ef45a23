//! Versioned binary persistence for [`GamPredictor`].
//!
//! Layout, all integers and reals little-endian:
//!
//! ```text
//! signature                  8 raw bytes ("GAM REGP")
//! version written            u32
//! minimum reader version     u32
//! minimum writer readable    u32
//! mean effect                f64
//! input length               u32
//! feature count              u32
//! feature map                u32 x feature count
//! per feature:
//!     bin count              u32
//!     effects                f64 x bin count
//! ```
//!
//! The three version words gate loading from both directions: a file
//! written by a version older than `VER_WE_CAN_READ_BACK` is rejected,
//! and so is a file demanding a reader newer than the current writer.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::binning::Binner;
use crate::error::GamError;
use super::gam_predictor::GamPredictor;


/// The signature identifying a persisted GAM regression predictor.
pub const MODEL_SIGNATURE: &[u8; 8] = b"GAM REGP";
/// The version the current writer produces.
pub const VER_WRITTEN: u32 = 0x0001_0001;
/// The minimum reader version able to read what the current
/// writer produces.
pub const VER_READABLE: u32 = 0x0001_0001;
/// The minimum writer version the current reader can still read.
pub const VER_WE_CAN_READ_BACK: u32 = 0x0001_0001;


impl GamPredictor {
    /// Write `self` to `writer` in the versioned binary format.
    /// The current writer version is always written; the format is
    /// never downgraded on write.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), GamError> {
        writer.write_all(MODEL_SIGNATURE)?;
        write_u32(writer, VER_WRITTEN)?;
        write_u32(writer, VER_READABLE)?;
        write_u32(writer, VER_WE_CAN_READ_BACK)?;

        write_f64(writer, self.mean_effect())?;
        write_u32(writer, self.input_length() as u32)?;

        write_u32(writer, self.feature_map().len() as u32)?;
        for &col in self.feature_map() {
            write_u32(writer, col as u32)?;
        }

        for effects in self.bin_effects() {
            write_u32(writer, effects.len() as u32)?;
            for &effect in effects {
                write_f64(writer, effect)?;
            }
        }
        Ok(())
    }


    /// Read a predictor back from `reader`.
    /// The caller supplies the `binner` holding the quantization
    /// boundaries used at training time.
    ///
    /// # Errors
    /// Fails with [`GamError::Signature`] when the file does not begin
    /// with the expected signature (the body is never parsed in that
    /// case), with [`GamError::Version`] when the stored version lies
    /// outside the readable range, with [`GamError::Corrupt`] when the
    /// body is malformed, and with [`GamError::Config`] when the
    /// supplied binner does not cover the model's columns and bins.
    /// No partial predictor is ever returned.
    pub fn load<R: Read>(reader: &mut R, binner: Binner)
        -> Result<Self, GamError>
    {
        let mut signature = [0_u8; 8];
        reader.read_exact(&mut signature)?;
        if &signature != MODEL_SIGNATURE {
            return Err(GamError::Signature {
                expected: String::from_utf8_lossy(MODEL_SIGNATURE)
                    .into_owned(),
                found: String::from_utf8_lossy(&signature).into_owned(),
            });
        }

        let written = read_u32(reader)?;
        let readable = read_u32(reader)?;
        let _we_can_read_back = read_u32(reader)?;

        if written < VER_WE_CAN_READ_BACK
            || written > VER_WRITTEN
            || readable > VER_WRITTEN
        {
            return Err(GamError::Version { written, readable });
        }

        let mean_effect = read_f64(reader)?;
        let input_length = read_u32(reader)? as usize;

        if binner.n_columns() < input_length {
            return Err(GamError::Config(format!(
                "the supplied binner covers {} column(s), \
                 the model expects {input_length}",
                binner.n_columns()
            )));
        }

        let n_feature = read_u32(reader)? as usize;
        let mut feature_map = Vec::with_capacity(n_feature);
        for _ in 0..n_feature {
            let col = read_u32(reader)? as usize;
            if col >= input_length {
                return Err(GamError::Corrupt(format!(
                    "feature map entry {col} exceeds \
                     the input length {input_length}"
                )));
            }
            feature_map.push(col);
        }

        let mut bin_effects = Vec::with_capacity(n_feature);
        for f in 0..n_feature {
            let n_bins = read_u32(reader)? as usize;
            if n_bins == 0 {
                return Err(GamError::Corrupt(format!(
                    "feature {f} has an empty effect table"
                )));
            }
            let expected = binner.n_bins(feature_map[f]);
            if n_bins != expected {
                return Err(GamError::Config(format!(
                    "feature {f} has {n_bins} effect(s), the binner \
                     defines {expected} bin(s) for column {}",
                    feature_map[f]
                )));
            }
            let mut effects = Vec::with_capacity(n_bins);
            for _ in 0..n_bins {
                effects.push(read_f64(reader)?);
            }
            bin_effects.push(effects);
        }

        Ok(GamPredictor::from_parts(
            mean_effect, bin_effects, feature_map, input_length, binner,
        ))
    }


    /// Save to the file at `path` through a buffered writer.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P)
        -> Result<(), GamError>
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)
    }


    /// Load from the file at `path` through a buffered reader.
    pub fn load_from_path<P: AsRef<Path>>(path: P, binner: Binner)
        -> Result<Self, GamError>
    {
        let mut reader = BufReader::new(File::open(path)?);
        Self::load(&mut reader, binner)
    }
}


fn write_u32<W: Write>(writer: &mut W, value: u32) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}


fn write_f64<W: Write>(writer: &mut W, value: f64) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}


fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0_u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}


fn read_f64<R: Read>(reader: &mut R) -> std::io::Result<f64> {
    let mut buf = [0_u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

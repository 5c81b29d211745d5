//! Mono 16-bit PCM WAV output.

use std::io::{Seek, Write};
use std::path::Path;

use crate::error::Result;

/// WAV header parameters for the given sample rate.
pub fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write the given samples as a complete WAV stream.
pub fn write_wav<W: Write + Seek>(writer: W, samples: &[i16], sample_rate: u32)
    -> Result<()>
{
    let mut w = hound::WavWriter::new(writer, spec(sample_rate))?;

    for &s in samples {
        w.write_sample(s)?;
    }

    w.finalize()?;

    Ok(())
}

/// Create or replace the file at `path` with a WAV of the given samples.
pub fn write_wav_file<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32)
    -> Result<()>
{
    let path = path.as_ref();
    let mut w = hound::WavWriter::create(path, spec(sample_rate))?;

    for &s in samples {
        w.write_sample(s)?;
    }

    w.finalize()?;

    debug!(path = %path.display(), samples = samples.len(), sample_rate, "wrote wav");

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write() {
        let samples = [0, 23170, 32767, -32767, -1];
        let mut buf = Cursor::new(Vec::new());

        write_wav(&mut buf, &samples, 8000).unwrap();
        buf.set_position(0);

        let mut r = hound::WavReader::new(buf).unwrap();
        assert_eq!(r.spec(), spec(8000));
        assert_eq!(r.duration(), 5);

        let read = r.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>().unwrap();
        assert_eq!(&read[..], &samples[..]);
    }

    #[test]
    fn test_empty() {
        let mut buf = Cursor::new(Vec::new());
        write_wav(&mut buf, &[], 44100).unwrap();
        buf.set_position(0);

        let r = hound::WavReader::new(buf).unwrap();
        assert_eq!(r.spec().sample_rate, 44100);
        assert_eq!(r.duration(), 0);
    }
}

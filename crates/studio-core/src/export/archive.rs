//! Zip bundling of exported files

use anyhow::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build an in-memory zip with every file placed under `root/`
pub fn build_zip(root: &str, files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in files {
            let zip_path = format!("{}/{}", root, name);
            zip.start_file(&zip_path, options)?;
            zip.write_all(content)?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

//! Snapshot writers: legacy VTK structured points, VTK-XML image data, the
//! PVD collection manifest and CSV dumps. All ASCII, x varying fastest.

use std::io::Write;

use solver::Field;

/// Legacy `STRUCTURED_POINTS` format, 6 decimal places, wrapped at 8 values
/// per line within each row.
pub fn write_legacy(
    w: &mut impl Write,
    field: &Field,
    dx: f64,
    dy: f64,
    name: &str,
) -> std::io::Result<()> {
    let (nx, ny) = (field.nx(), field.ny());
    writeln!(w, "# vtk DataFile Version 3.0")?;
    writeln!(w, "Steady-state temperature (Jacobi)")?;
    writeln!(w, "ASCII")?;
    writeln!(w, "DATASET STRUCTURED_POINTS")?;
    writeln!(w, "DIMENSIONS {} {} 1", nx, ny)?;
    writeln!(w, "ORIGIN 0 0 0")?;
    writeln!(w, "SPACING {} {} 1.0", dx, dy)?;
    writeln!(w, "POINT_DATA {}", nx * ny)?;
    writeln!(w, "SCALARS {} float 1", name)?;
    writeln!(w, "LOOKUP_TABLE default")?;

    for j in 0..ny {
        let mut line: Vec<String> = Vec::new();
        for i in 0..nx {
            line.push(format!("{:.6}", field.get(i, j)));
            if line.len() >= 8 {
                writeln!(w, "{}", line.join(" "))?;
                line.clear();
            }
        }
        if !line.is_empty() {
            writeln!(w, "{}", line.join(" "))?;
        }
    }
    Ok(())
}

/// VTK-XML `ImageData` (`.vti`), one ASCII point-data array.
pub fn write_image_data(
    w: &mut impl Write,
    field: &Field,
    dx: f64,
    dy: f64,
    name: &str,
) -> std::io::Result<()> {
    let (nx, ny) = (field.nx(), field.ny());
    writeln!(w, "<?xml version=\"1.0\"?>")?;
    writeln!(
        w,
        "<VTKFile type=\"ImageData\" version=\"0.1\" byte_order=\"LittleEndian\">"
    )?;
    writeln!(
        w,
        "  <ImageData WholeExtent=\"0 {} 0 {} 0 0\" Origin=\"0 0 0\" Spacing=\"{} {} 1\">",
        nx - 1,
        ny - 1,
        dx,
        dy
    )?;
    writeln!(w, "    <Piece Extent=\"0 {} 0 {} 0 0\">", nx - 1, ny - 1)?;
    writeln!(w, "      <PointData Scalars=\"{}\">", name)?;
    writeln!(
        w,
        "        <DataArray type=\"Float32\" Name=\"{}\" format=\"ascii\">",
        name
    )?;
    for j in 0..ny {
        let row: Vec<String> = (0..nx).map(|i| format!("{:.6}", field.get(i, j))).collect();
        writeln!(w, "{}", row.join(" "))?;
    }
    writeln!(w, "        </DataArray>")?;
    writeln!(w, "      </PointData>")?;
    writeln!(w, "      <CellData/>")?;
    writeln!(w, "    </Piece>")?;
    writeln!(w, "  </ImageData>")?;
    writeln!(w, "</VTKFile>")?;
    Ok(())
}

/// PVD collection manifest; `timestep` is the sweep number at capture time.
pub fn write_collection(w: &mut impl Write, entries: &[(String, u32)]) -> std::io::Result<()> {
    writeln!(w, "<?xml version=\"1.0\"?>")?;
    writeln!(
        w,
        "<VTKFile type=\"Collection\" version=\"0.1\" byte_order=\"LittleEndian\">"
    )?;
    writeln!(w, "  <Collection>")?;
    for (file, sweep) in entries {
        writeln!(
            w,
            "    <DataSet timestep=\"{:.6}\" file=\"{}\"/>",
            *sweep as f64, file
        )?;
    }
    writeln!(w, "  </Collection>")?;
    writeln!(w, "</VTKFile>")?;
    Ok(())
}

/// CSV snapshot, one row per cell.
pub fn write_csv(w: &mut impl Write, field: &Field) -> std::io::Result<()> {
    writeln!(w, "i,j,T")?;
    for j in 0..field.ny() {
        for i in 0..field.nx() {
            writeln!(w, "{},{},{:.6}", i, j, field.get(i, j))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field(nx: usize, ny: usize) -> Field {
        let mut field = Field::new(nx, ny, 0.0);
        for j in 0..ny {
            for i in 0..nx {
                field.set(i, j, (j * nx + i) as f64);
            }
        }
        field
    }

    #[test]
    fn legacy_header_and_wrapping() {
        let mut buf = Vec::new();
        write_legacy(&mut buf, &sample_field(10, 2), 0.5, 0.5, "Temperature").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# vtk DataFile Version 3.0");
        assert_eq!(lines[2], "ASCII");
        assert_eq!(lines[3], "DATASET STRUCTURED_POINTS");
        assert_eq!(lines[4], "DIMENSIONS 10 2 1");
        assert_eq!(lines[6], "SPACING 0.5 0.5 1.0");
        assert_eq!(lines[7], "POINT_DATA 20");
        assert_eq!(lines[8], "SCALARS Temperature float 1");
        assert_eq!(lines[9], "LOOKUP_TABLE default");

        // Each 10-value row wraps at 8: a full line then the remainder.
        assert_eq!(lines[10].split(' ').count(), 8);
        assert_eq!(lines[11], "8.000000 9.000000");
        assert_eq!(lines[12].split(' ').count(), 8);
        assert_eq!(lines[13], "18.000000 19.000000");
    }

    #[test]
    fn image_data_layout() {
        let mut buf = Vec::new();
        write_image_data(&mut buf, &sample_field(3, 2), 1.0, 2.0, "Temperature").unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("<VTKFile type=\"ImageData\""));
        assert!(text.contains("WholeExtent=\"0 2 0 1 0 0\""));
        assert!(text.contains("Spacing=\"1 2 1\""));
        assert!(text.contains("<DataArray type=\"Float32\" Name=\"Temperature\" format=\"ascii\">"));
        // x fastest: row 0 before row 1
        assert!(text.contains("0.000000 1.000000 2.000000\n3.000000 4.000000 5.000000"));
    }

    #[test]
    fn collection_lists_sweeps_as_timesteps() {
        let entries = vec![
            ("step_00000.vti".to_string(), 0),
            ("step_00020.vti".to_string(), 20),
        ];
        let mut buf = Vec::new();
        write_collection(&mut buf, &entries).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("<VTKFile type=\"Collection\""));
        assert!(text.contains("<DataSet timestep=\"0.000000\" file=\"step_00000.vti\"/>"));
        assert!(text.contains("<DataSet timestep=\"20.000000\" file=\"step_00020.vti\"/>"));
    }

    #[test]
    fn csv_rows_cover_every_cell() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample_field(2, 2)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "i,j,T");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "0,0,0.000000");
        assert_eq!(lines[4], "1,1,3.000000");
    }
}

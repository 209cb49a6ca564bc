use crate::error::SolverError;
use crate::field::{Field, FixedMask, HotRegion};
use crate::run::RunParams;

/// Build the initial field and fixed mask for one run.
///
/// Bottom row at `bottom_temp`, top row at `top_temp`, left/right columns on
/// a linear ramp between the two, the centered hot region at `hot_temp`.
/// Interior cells start at `bottom_temp` as the initial guess.
pub fn init_plate(params: &RunParams) -> Result<(Field, FixedMask), SolverError> {
    params.validate()?;
    let (nx, ny) = (params.nx, params.ny);

    let mut field = Field::new(nx, ny, params.bottom_temp);
    let mut mask = FixedMask::new(nx, ny);

    for i in 0..nx {
        field.set(i, 0, params.bottom_temp);
        field.set(i, ny - 1, params.top_temp);
        mask.set_fixed(i, 0);
        mask.set_fixed(i, ny - 1);
    }

    // Side columns ramp with the row index; the corners land on the
    // row values they already hold.
    for j in 0..ny {
        let y = if ny > 1 {
            j as f64 / (ny - 1) as f64
        } else {
            0.0
        };
        let ramp = params.bottom_temp + (params.top_temp - params.bottom_temp) * y;
        field.set(0, j, ramp);
        field.set(nx - 1, j, ramp);
        mask.set_fixed(0, j);
        mask.set_fixed(nx - 1, j);
    }

    let region = HotRegion::centered(nx, ny, params.hot_fraction);
    if let Some((i0, i1, j0, j1)) = region.bounds() {
        for j in j0..=j1 {
            for i in i0..=i1 {
                field.set(i, j, params.hot_temp);
                mask.set_fixed(i, j);
            }
        }
    }

    Ok((field, mask))
}

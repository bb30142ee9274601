use crate::error::{ChartError, ChartResult};

/// Maps a continuous data domain onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds a scale from a data extent, widening single-value extents so
    /// constant series still map to the middle of the span.
    pub fn from_extent(min: f64, max: f64) -> ChartResult<Self> {
        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
            return Self::new(min - pad, max + pad);
        }
        Self::new(min, max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Projects `value` onto the pixel span `range_start..range_end`.
    pub fn domain_to_pixel(self, value: f64, range_start: f64, range_end: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData("pixel span must be finite".to_owned()));
        }

        let normalized = (value * 0.5 - self.domain_start * 0.5) / self.half_span();
        Ok(range_start + normalized * (range_end - range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, range_start: f64, range_end: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        if range_start == range_end {
            return Err(ChartError::InvalidData("pixel span must be non-zero".to_owned()));
        }

        let normalized = (pixel - range_start) / (range_end - range_start);
        Ok(self.domain_start + normalized * self.half_span() * 2.0)
    }

    /// Half the domain width. Stays finite for any pair of finite bounds.
    fn half_span(self) -> f64 {
        self.domain_end * 0.5 - self.domain_start * 0.5
    }
}

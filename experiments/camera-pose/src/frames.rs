use skel_base::Tensor;
use skel_infer::{FrameGrabber, InferError};

/// Stand-in camera: serves the same gradient test card on every grab
#[derive(Clone, Debug)]
pub struct TestCard {
    frame: Tensor<u8>,
}

impl TestCard {
    pub fn new(width: usize, height: usize) -> Result<Self, InferError> {
        let frame = Tensor::new(vec![height, width, 3], test_card_pixels(width, height))?;
        Ok(Self { frame })
    }

    /// HWC RGB bytes of the card
    pub fn rgb(&self) -> &[u8] {
        &self.frame.data
    }
}

impl FrameGrabber for TestCard {
    fn grab(&mut self) -> Result<Tensor<u8>, InferError> {
        Ok(self.frame.clone())
    }
}

/// Red ramps left to right, green top to bottom, blue stays dim
pub fn test_card_pixels(width: usize, height: usize) -> Vec<u8> {
    let x_span = width.saturating_sub(1).max(1);
    let y_span = height.saturating_sub(1).max(1);
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / x_span) as u8);
            data.push((y * 255 / y_span) as u8);
            data.push(48);
        }
    }
    data
}

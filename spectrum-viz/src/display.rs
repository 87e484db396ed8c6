use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    mono_font::{MonoFont, MonoTextStyleBuilder},
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};

/// The narrow slice of a display the spectrum loop needs.
pub trait DisplayOutput {
    type Color: Copy;
    type Error;

    /// Draw the inclusive segment of column `x` between `y_start` and `y_end`.
    fn draw_vertical_line(
        &mut self,
        x: i32,
        y_start: i32,
        y_end: i32,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Setup-time text. Displays without text support may ignore it.
    fn draw_text(&mut self, banner: &Banner<Self::Color>) -> Result<(), Self::Error> {
        let _ = banner;
        Ok(())
    }

    /// Called once per frame after all bars are drawn. Buffered displays flush here.
    fn present(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: DisplayOutput + ?Sized> DisplayOutput for &mut T {
    type Color = T::Color;
    type Error = T::Error;

    fn draw_vertical_line(
        &mut self,
        x: i32,
        y_start: i32,
        y_end: i32,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        T::draw_vertical_line(self, x, y_start, y_end, color)
    }

    fn draw_text(&mut self, banner: &Banner<Self::Color>) -> Result<(), Self::Error> {
        T::draw_text(self, banner)
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        T::present(self)
    }
}

/// A line of text drawn once before the loop starts, on a solid background.
#[derive(Clone, Copy)]
pub struct Banner<C> {
    pub text: &'static str,
    /// Top-left corner of the text.
    pub position: Point,
    pub font: &'static MonoFont<'static>,
    pub foreground: C,
    pub background: C,
}

/// Draw `banner` on any embedded-graphics target.
pub fn draw_banner<D>(target: &mut D, banner: &Banner<D::Color>) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let style = MonoTextStyleBuilder::new()
        .font(banner.font)
        .text_color(banner.foreground)
        .background_color(banner.background)
        .build();
    Text::with_baseline(banner.text, banner.position, style, Baseline::Top).draw(target)?;
    Ok(())
}

/// Adapts an embedded-graphics [`DrawTarget`] to [`DisplayOutput`].
pub struct GraphicsTarget<D> {
    display: D,
}

impl<D> GraphicsTarget<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    pub fn inner(&self) -> &D {
        &self.display
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_inner(self) -> D {
        self.display
    }
}

impl<D: DrawTarget> DisplayOutput for GraphicsTarget<D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_vertical_line(
        &mut self,
        x: i32,
        y_start: i32,
        y_end: i32,
        color: D::Color,
    ) -> Result<(), D::Error> {
        Line::new(Point::new(x, y_start), Point::new(x, y_end))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.display)
    }

    fn draw_text(&mut self, banner: &Banner<D::Color>) -> Result<(), D::Error> {
        draw_banner(&mut self.display, banner)
    }
}

/// [`GraphicsTarget`] for displays that draw into a RAM buffer and need an
/// explicit flush, which runs once per frame from [`DisplayOutput::present`].
pub struct BufferedTarget<D, F> {
    target: GraphicsTarget<D>,
    flush: F,
}

impl<D, F> BufferedTarget<D, F>
where
    D: DrawTarget,
    F: FnMut(&mut D) -> Result<(), D::Error>,
{
    pub fn new(display: D, flush: F) -> Self {
        Self {
            target: GraphicsTarget::new(display),
            flush,
        }
    }

    pub fn inner(&self) -> &D {
        self.target.inner()
    }

    pub fn inner_mut(&mut self) -> &mut D {
        self.target.inner_mut()
    }
}

impl<D, F> DisplayOutput for BufferedTarget<D, F>
where
    D: DrawTarget,
    F: FnMut(&mut D) -> Result<(), D::Error>,
{
    type Color = D::Color;
    type Error = D::Error;

    fn draw_vertical_line(
        &mut self,
        x: i32,
        y_start: i32,
        y_end: i32,
        color: D::Color,
    ) -> Result<(), D::Error> {
        self.target.draw_vertical_line(x, y_start, y_end, color)
    }

    fn draw_text(&mut self, banner: &Banner<D::Color>) -> Result<(), D::Error> {
        self.target.draw_text(banner)
    }

    fn present(&mut self) -> Result<(), D::Error> {
        (self.flush)(self.target.inner_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        mock_display::MockDisplay, mono_font::ascii::FONT_6X10, pixelcolor::BinaryColor,
    };

    #[test]
    fn test_vertical_line_is_inclusive() {
        let mut target = GraphicsTarget::new(MockDisplay::<BinaryColor>::new());
        target
            .draw_vertical_line(1, 3, 1, BinaryColor::On)
            .unwrap();
        target
            .draw_vertical_line(2, 0, 0, BinaryColor::Off)
            .unwrap();

        target.into_inner().assert_pattern(&[
            "  .", //
            " # ",
            " # ",
            " # ",
        ]);
    }

    #[test]
    fn test_banner_fills_its_background() {
        let mut target = GraphicsTarget::new(MockDisplay::<BinaryColor>::new());
        let banner = Banner {
            text: "A",
            position: Point::new(0, 0),
            font: &FONT_6X10,
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
        };
        target.draw_text(&banner).unwrap();

        let display = target.into_inner();
        let area = display.affected_area();
        assert_eq!(area.top_left, Point::zero());
        assert_eq!(area.size, FONT_6X10.character_size);
        // Every pixel of the glyph cell is painted in one of the two colors.
        for y in 0..10 {
            for x in 0..6 {
                assert!(display.get_pixel(Point::new(x, y)).is_some());
            }
        }
        let lit = (0..10)
            .flat_map(|y| (0..6).map(move |x| Point::new(x, y)))
            .filter(|&p| display.get_pixel(p) == Some(BinaryColor::On))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_buffered_target_flushes_on_present() {
        let mut flushes = 0;
        {
            let mut target = BufferedTarget::new(MockDisplay::<BinaryColor>::new(), |_| {
                flushes += 1;
                Ok(())
            });
            target
                .draw_vertical_line(0, 1, 0, BinaryColor::On)
                .unwrap();
            target.present().unwrap();
            target.present().unwrap();
            assert_eq!(target.inner().affected_area().size.height, 2);
        }
        assert_eq!(flushes, 2);
    }
}

use spectrum_dsp::AnalogInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum AdcError<E> {
    /// Only one channel is wired up.
    UnknownChannel(u8),
    Conversion(E),
}

/// One ADC pin exposed as a numbered channel.
///
/// `read` starts or polls a one-shot conversion, in the `nb` style of the
/// esp-hal ADC driver; [`AnalogInput::read_channel`] blocks until it is done.
pub struct OneShotAdc<F> {
    channel: u8,
    read: F,
}

impl<F, E> OneShotAdc<F>
where
    F: FnMut() -> nb::Result<u16, E>,
{
    pub fn new(channel: u8, read: F) -> Self {
        Self { channel, read }
    }
}

impl<F, E> AnalogInput for OneShotAdc<F>
where
    F: FnMut() -> nb::Result<u16, E>,
{
    type Error = AdcError<E>;

    fn read_channel(&mut self, channel: u8) -> Result<u16, Self::Error> {
        if channel != self.channel {
            return Err(AdcError::UnknownChannel(channel));
        }
        nb::block!((self.read)()).map_err(AdcError::Conversion)
    }
}

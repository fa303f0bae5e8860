use crate::channel::RegisterChannel;
use mockall::mock;

mock! {
    pub Channel {}

    impl RegisterChannel for Channel {
        type Error = u32;

        fn read<'b>(&mut self, address: u64, buffer: &'b mut [u8]) -> Result<(), u32>;
        fn write<'b>(&mut self, address: u64, data: &'b [u8]) -> Result<(), u32>;
    }
}

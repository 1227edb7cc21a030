use liveboot_core::boot::VariableStore;
use uguid::Guid;

use crate::uefi::to_ucs2;
use crate::RuntimeServices;

/// `SetVariable` through the runtime services table
pub struct RuntimeVariableStore<'a> {
    rt: &'a RuntimeServices,
}

impl<'a> RuntimeVariableStore<'a> {
    pub fn new(rt: &'a RuntimeServices) -> Self {
        Self { rt }
    }
}

impl VariableStore for RuntimeVariableStore<'_> {
    fn set(
        &mut self,
        namespace: &Guid,
        name: &str,
        attributes: u32,
        data: &[u8],
    ) -> Result<(), usize> {
        let name = to_ucs2(name);
        let vendor = namespace.to_bytes();
        let status = (self.rt.set_variable)(
            name.as_ptr(),
            &vendor,
            attributes,
            data.len(),
            data.as_ptr(),
        );
        if status != 0 {
            return Err(status);
        }
        Ok(())
    }
}

//! Reading and writing program accounts that may not exist yet.

use anchor_lang::prelude::*;

use crate::error::{VestingError, VestingResult};

/// Deserializes a `T` from an account owned by this program. An account that
/// is empty, owned elsewhere or holds some other type fails with `missing`.
pub fn read_owned<T: AccountDeserialize>(
    owner: &Pubkey,
    data: &[u8],
    missing: VestingError,
) -> VestingResult<T> {
    if *owner != crate::ID || data.is_empty() {
        return Err(missing);
    }
    let mut buf = data;
    T::try_deserialize(&mut buf).map_err(|_| missing)
}

/// Serializes `value` back into `info`, discriminator first.
pub fn write_owned<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data[..];
    value.try_serialize(&mut dst)
}

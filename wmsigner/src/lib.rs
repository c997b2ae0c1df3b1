/*!
    WebMoney WMSigner: recovers the signing key from a `.kwm` key file and
    produces request signatures.

    ```no_run
    let signer = wmsigner::Signer::from_file("405002833238", "keys/405002833238.kwm", "password")?;
    let signature = signer.sign("request data")?;
    # Ok::<(), wmsigner::SignerError>(())
    ```
*/

#![allow(clippy::doc_overindented_list_items)]

mod constants;
mod container;
mod crypto;
mod error;
mod material;
mod random;
mod recovery;
mod signer;
mod utils;

pub use ::rsa::BigUint;

pub use self::constants::{CONTAINER_LEN, RANDOM_LEN};
pub use self::container::KeyContainer;
pub use self::error::{SignerError, SignerResult};
pub use self::material::KeyMaterial;
pub use self::random::ReaderRng;
pub use self::recovery::{
    PasswordVariant, half_password, recover, recover_with_fallback, try_recover,
};
pub use self::signer::Signer;

mod entry;

use strest_remote_write::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

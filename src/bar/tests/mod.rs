mod keyboard;
mod support;

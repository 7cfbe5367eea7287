//! Native runtime shape: the files the bundled GUI runtime needs on each OS.
//!
//! The tables are data keyed by [`Platform`]; nothing here branches on the
//! host. `runtime_shape` expands a table into plain accept/reject glob lists
//! that become the last layer of every classifier.

use crate::platform::Platform;

macro_rules! miniqt {
    ($file:literal) => {
        concat!("node_modules/@nodegui/nodegui/miniqt/**/", $file)
    };
}

const COMMON_ACCEPT: &[&str] = &[
    "node_modules/@nodegui/qode/package.json",
    "node_modules/@nodegui/nodegui/package.json",
    "node_modules/@nodegui/nodegui/dist/**/*.js",
    "node_modules/postcss/**/*",
    "node_modules/picocolors/picocolors.js",
    "node_modules/picocolors/README.md",
    "node_modules/picocolors/LICENSE",
    "node_modules/picocolors/package.json",
    "node_modules/source-map/**/*",
    "node_modules/postcss-nodegui-autoprefixer/**/*",
    "node_modules/cuid/index.js",
    "node_modules/cuid/lib/*.js",
    "node_modules/cuid/LICENSE",
    "node_modules/cuid/package.json",
    "node_modules/memoize-one/README.md",
    "node_modules/memoize-one/LICENSE",
    "node_modules/memoize-one/package.json",
    "node_modules/memoize-one/dist/memoize-one.cjs.js",
];

const COMMON_REJECT: &[&str] = &[
    "node_modules/@nodegui/nodegui/dist/demo.js",
    "node_modules/@nodegui/nodegui/dist/demo.d.ts",
    "node_modules/@nodegui/nodegui/dist/examples/**/*",
    "node_modules/postcss-nodegui-autoprefixer/CHANGELOG.md",
    "node_modules/postcss-nodegui-autoprefixer/dist/index.d.ts",
    "node_modules/postcss-nodegui-autoprefixer/dist/__tests__/*",
];

const NATIVE_ADDON: &str = "node_modules/@nodegui/nodegui/build/Release/nodegui_core.node";

const LINUX_ACCEPT: &[&str] = &[
    "node_modules/@nodegui/qode/binaries/*",
    NATIVE_ADDON,
    miniqt!("libQt6Core.so*"),
    miniqt!("libQt6DBus.so*"),
    miniqt!("libQt6EglFSDeviceIntegration.so*"),
    miniqt!("libQt6EglFsKmsSupport.so*"),
    miniqt!("libQt6Gui.so*"),
    miniqt!("libQt6Network.so*"),
    miniqt!("libQt6PrintSupport.so*"),
    miniqt!("libQt6OpenGL.so*"),
    miniqt!("libQt6OpenGLWidgets.so*"),
    miniqt!("libQt6Sql.so*"),
    miniqt!("libQt6Svg.so*"),
    miniqt!("libQt6SvgWidgets.so*"),
    miniqt!("libQt6Widgets.so*"),
    miniqt!("libQt6XcbQpa.so*"),
    miniqt!("libicudata.so*"),
    miniqt!("libicui18n.so*"),
    miniqt!("libicule.so*"),
    miniqt!("libicutu.so*"),
    miniqt!("libicuuc.so*"),
    miniqt!("libicuio.so*"),
    miniqt!("libiculx.so*"),
    miniqt!("libqconnmanbearer.so"),
    miniqt!("libqgenericbearer.so"),
    miniqt!("libqnmbearer.so"),
    miniqt!("libqsvgicon.so"),
    miniqt!("libqgif.so"),
    miniqt!("libqico.so"),
    miniqt!("libqjpeg.so"),
    miniqt!("libqsvg.so"),
    miniqt!("libcomposeplatforminputcontextplugin.so"),
    miniqt!("libibusplatforminputcontextplugin.so"),
    miniqt!("libqxcb.so"),
    miniqt!("libcupsprintersupport.so"),
    miniqt!("libqgtk3.so"),
    miniqt!("libqxdgdesktopportal.so"),
    miniqt!("libqxcb-egl-integration.so"),
    miniqt!("libqxcb-glx-integration.so"),
];

const WINDOWS_ACCEPT: &[&str] = &[
    "node_modules/@nodegui/qode/binaries/*.exe",
    NATIVE_ADDON,
    miniqt!("D3Dcompiler_47.dll"),
    miniqt!("libEGL.dll"),
    miniqt!("libGLESv2.dll"),
    miniqt!("Qt6Core.dll"),
    miniqt!("Qt6Gui.dll"),
    miniqt!("Qt6OpenGL.dll"),
    miniqt!("Qt6OpenGLWidgets.dll"),
    miniqt!("Qt6Svg.dll"),
    miniqt!("Qt6SvgWidgets.dll"),
    miniqt!("Qt6Widgets.dll"),
    miniqt!("qsvgicon.dll"),
    miniqt!("qwindows.dll"),
    miniqt!("qwindowsvistastyle.dll"),
    miniqt!("qgif.dll"),
    miniqt!("qico.dll"),
    miniqt!("qjpeg.dll"),
    miniqt!("qsvg.dll"),
];

const MACOS_ACCEPT: &[&str] = &[
    "node_modules/@nodegui/qode/binaries/*",
    NATIVE_ADDON,
    miniqt!("plugins/iconengines/libqsvgicon.dylib"),
    miniqt!("plugins/imageformats/*.dylib"),
    miniqt!("plugins/platforms/*.dylib"),
    miniqt!("plugins/platformthemes/libqxdgdesktopportal.dylib"),
    miniqt!("plugins/printsupport/libcocoaprintersupport.dylib"),
    miniqt!("plugins/styles/libqmacstyle.dylib"),
];

const MACOS_FRAMEWORKS: &[&str] = &[
    "QtConcurrent",
    "QtCore",
    "QtDBus",
    "QtGui",
    "QtOpenGL",
    "QtOpenGLWidgets",
    "QtPrintSupport",
    "QtSvg",
    "QtSvgWidgets",
    "QtWidgets",
];

const MINIQT_ROOT: &str = "node_modules/@nodegui/nodegui/miniqt/**";

struct ShapeTable {
    platform: Platform,
    accept: &'static [&'static str],
    /// Framework bundles kept whole, minus their development headers.
    frameworks: &'static [&'static str],
}

static SHAPES: [ShapeTable; 3] = [
    ShapeTable {
        platform: Platform::Linux,
        accept: LINUX_ACCEPT,
        frameworks: &[],
    },
    ShapeTable {
        platform: Platform::Macos,
        accept: MACOS_ACCEPT,
        frameworks: MACOS_FRAMEWORKS,
    },
    ShapeTable {
        platform: Platform::Windows,
        accept: WINDOWS_ACCEPT,
        frameworks: &[],
    },
];

/// Expanded accept/reject glob lists for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeShape {
    pub platform: Platform,
    pub accept: Vec<String>,
    pub reject: Vec<String>,
}

pub fn runtime_shape(platform: Platform) -> RuntimeShape {
    let mut accept: Vec<String> = COMMON_ACCEPT.iter().map(|p| p.to_string()).collect();
    let mut reject: Vec<String> = COMMON_REJECT.iter().map(|p| p.to_string()).collect();

    if let Some(table) = SHAPES.iter().find(|t| t.platform == platform) {
        accept.extend(table.accept.iter().map(|p| p.to_string()));

        for framework in table.frameworks {
            accept.push(format!("{}/{}.framework/**/*", MINIQT_ROOT, framework));
            reject.push(format!("{}/{}.framework/Headers", MINIQT_ROOT, framework));
            reject.push(format!("{}/{}.framework/**/Headers/**/*", MINIQT_ROOT, framework));
        }
    }

    RuntimeShape {
        platform,
        accept,
        reject,
    }
}
